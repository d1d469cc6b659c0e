//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing for registered users.
//! - [`jwt`] -- validation of HS256 access tokens issued by the auth provider.

pub mod jwt;
pub mod password;
