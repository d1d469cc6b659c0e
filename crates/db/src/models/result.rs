//! Delivered result folders and images.

use serde::{Deserialize, Serialize};
use shootdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A result folder. `path` is the slash-joined chain of folder names from
/// the root, e.g. `/Finals/Retouched`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResultFolder {
    pub id: DbId,
    pub project_id: DbId,
    pub parent_id: Option<DbId>,
    pub name: String,
    pub path: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResultImage {
    pub id: DbId,
    pub folder_id: DbId,
    pub filename: String,
    pub path: String,
    pub thumbnail: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateResultFolder {
    pub name: String,
    pub parent_id: Option<DbId>,
}

/// Metadata of a stored result upload.
#[derive(Debug, Clone)]
pub struct CreateResultImage {
    pub folder_id: DbId,
    pub filename: String,
    pub path: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// Display path of a folder created under `parent_path`.
pub fn child_folder_path(parent_path: Option<&str>, name: &str) -> String {
    format!("{}/{}", parent_path.unwrap_or(""), name.trim())
}
