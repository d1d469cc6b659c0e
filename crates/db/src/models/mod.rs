//! Row models and input DTOs, one module per table group.

pub mod callsheet;
pub mod contract;
pub mod moodboard;
pub mod participant;
pub mod project;
pub mod project_access;
pub mod result;
pub mod selection;
pub mod user;
