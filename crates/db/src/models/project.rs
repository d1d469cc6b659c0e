//! Project entity model and DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shootdesk_core::public_view::{ModuleFlags, ProjectModule, SharingSettings};
use shootdesk_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub shoot_date: Option<Timestamp>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub short_code: String,
    pub is_archived: bool,
    pub is_public: bool,
    pub public_modules: Json<ModuleFlags>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// The settings the public short-link gate evaluates.
    pub fn sharing(&self) -> SharingSettings {
        SharingSettings {
            is_public: self.is_public,
            modules: self.public_modules.0,
        }
    }
}

/// A project in the dashboard list, with its owner's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub project: Project,
    pub owner_name: String,
}

/// Number of records in each content module.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectCounts {
    pub moodboard_groups: i64,
    pub participants: i64,
    pub contracts: i64,
    pub selection_images: i64,
}

/// DTO for creating a new project. The owner and short code are assigned by
/// the server.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub shoot_date: Option<Timestamp>,
    pub location: Option<String>,
    pub address: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
///
/// `public_modules` is merged into the stored map; modules it omits keep
/// their current visibility.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub shoot_date: Option<Timestamp>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub is_archived: Option<bool>,
    pub is_public: Option<bool>,
    pub public_modules: Option<BTreeMap<ProjectModule, bool>>,
}
