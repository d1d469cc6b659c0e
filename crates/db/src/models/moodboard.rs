//! Moodboard groups, their images and comments.

use serde::{Deserialize, Serialize};
use shootdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MoodboardGroup {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// `PENDING`, `ACCEPTED` or `REJECTED`.
    pub status: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MoodboardImage {
    pub id: DbId,
    pub group_id: DbId,
    pub filename: String,
    pub path: String,
    pub thumbnail: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// A comment joined with its author's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MoodboardComment {
    pub id: DbId,
    pub group_id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub content: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMoodboardGroup {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMoodboardGroup {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub sort_order: Option<i32>,
}

/// Metadata of a stored moodboard upload.
#[derive(Debug, Clone)]
pub struct CreateMoodboardImage {
    pub group_id: DbId,
    pub filename: String,
    pub path: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub content: String,
}
