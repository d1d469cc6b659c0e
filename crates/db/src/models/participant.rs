//! Participant entity model and DTOs.

use serde::{Deserialize, Serialize};
use shootdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A participant row. `user_id` links a registered account, set
/// automatically when the email matches one.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Participant {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: Option<DbId>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// What anonymous visitors of a public project see.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicParticipant {
    pub name: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateParticipant {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub notes: Option<String>,
}

/// DTO for updating a participant. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateParticipant {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub notes: Option<String>,
}
