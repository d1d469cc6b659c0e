//! Request extractors and permission guards.
//!
//! - [`auth::AuthUser`] -- the authenticated user from a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- the same, but anonymous requests pass.
//! - [`project_access`] -- view / edit / owner checks on a project.

pub mod auth;
pub mod project_access;
