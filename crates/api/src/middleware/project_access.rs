//! Project permission guards used at the top of project-scoped handlers.
//!
//! Each guard resolves the caller's [`AccessSource`] once and answers with
//! 404 when the project does not exist and 403 when it exists but the
//! caller lacks the required tier.

use shootdesk_core::access::AccessSource;
use shootdesk_core::error::CoreError;
use shootdesk_core::types::DbId;
use shootdesk_db::repositories::{ProjectAccessRepo, ProjectRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Resolve the caller's access, distinguishing a missing project from a
/// missing permission.
async fn resolve_or_reject(
    pool: &PgPool,
    user_id: DbId,
    project_id: DbId,
    denied: &str,
) -> AppResult<AccessSource> {
    if let Some(source) = ProjectAccessRepo::resolve(pool, user_id, project_id).await? {
        return Ok(source);
    }
    if !ProjectRepo::exists(pool, project_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    }
    Err(AppError::Core(CoreError::Forbidden(denied.to_string())))
}

/// Owner, any grant, or a participant match.
pub async fn require_view(pool: &PgPool, user_id: DbId, project_id: DbId) -> AppResult<AccessSource> {
    resolve_or_reject(pool, user_id, project_id, "No access to this project").await
}

/// Owner or editor grant.
pub async fn require_edit(pool: &PgPool, user_id: DbId, project_id: DbId) -> AppResult<AccessSource> {
    let source =
        resolve_or_reject(pool, user_id, project_id, "No permission to edit this project").await?;
    if !source.can_edit() {
        return Err(AppError::Core(CoreError::Forbidden(
            "No permission to edit this project".into(),
        )));
    }
    Ok(source)
}

/// Only the project's owner.
pub async fn require_owner(pool: &PgPool, user_id: DbId, project_id: DbId) -> AppResult<()> {
    let source = resolve_or_reject(
        pool,
        user_id,
        project_id,
        "Only the project owner can do this",
    )
    .await?;
    if !source.is_owner() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the project owner can do this".into(),
        )));
    }
    Ok(())
}
