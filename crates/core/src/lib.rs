//! Domain logic for the photoshoot organizer.
//!
//! Everything in this crate is pure: no database, no HTTP. The db and api
//! crates feed it rows and request state and act on the answers.

pub mod access;
pub mod error;
pub mod public_view;
pub mod rating;
pub mod settings;
pub mod shortcode;
pub mod types;
pub mod uploads;
pub mod validation;
