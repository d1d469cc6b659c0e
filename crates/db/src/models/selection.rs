//! Selection images and per-user ratings.

use serde::{Deserialize, Serialize};
use shootdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SelectionImage {
    pub id: DbId,
    pub project_id: DbId,
    pub filename: String,
    pub path: String,
    pub thumbnail: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub file_size: i64,
    pub imported_at: Timestamp,
}

/// A selection image with the requesting user's rating, if any.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SelectionImageWithRating {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub image: SelectionImage,
    pub stars: Option<i16>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ImageRating {
    pub id: DbId,
    pub image_id: DbId,
    pub user_id: DbId,
    pub stars: Option<i16>,
    pub color: Option<String>,
    pub updated_at: Timestamp,
}

/// Metadata of a stored selection upload.
#[derive(Debug, Clone)]
pub struct CreateSelectionImage {
    pub project_id: DbId,
    pub filename: String,
    pub path: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub file_size: i64,
}

/// Request body for rating an image. Both values replace the stored ones;
/// `null` clears.
#[derive(Debug, Clone, Deserialize)]
pub struct RateImage {
    pub stars: Option<i16>,
    pub color: Option<String>,
}

/// Optional filters on the caller's own rating.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionFilter {
    pub stars: Option<i16>,
    pub color: Option<String>,
}
