//! Explicit access grants (`project_access`).

use serde::{Deserialize, Serialize};
use shootdesk_core::access::GrantRole;
use shootdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A grant row. `role` holds one of the [`GrantRole`] column values.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AccessGrant {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A grant joined with the grantee's display info.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AccessGrantWithUser {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub user_name: String,
    pub user_email: String,
    pub user_image: Option<String>,
    pub created_at: Timestamp,
}

/// Request body for granting access by email.
#[derive(Debug, Clone, Deserialize)]
pub struct GrantAccess {
    pub email: String,
    pub role: GrantRole,
}
