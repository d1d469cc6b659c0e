pub mod access;
pub mod auth;
pub mod callsheet;
pub mod contract;
pub mod moodboard;
pub mod participant;
pub mod project;
pub mod public;
pub mod results;
pub mod selection;
pub mod user;
