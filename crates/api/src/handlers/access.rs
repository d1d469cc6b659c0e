//! Handlers for explicit project access grants.
//!
//! Grants live at `/projects/{id}/access[/{user_id}]`. The owner never holds
//! a grant row.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shootdesk_core::error::CoreError;
use shootdesk_core::types::DbId;
use shootdesk_core::validation::require_email;
use shootdesk_db::models::project_access::{AccessGrant, AccessGrantWithUser, GrantAccess};
use shootdesk_db::repositories::{ProjectAccessRepo, ProjectRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::{require_edit, require_view};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/projects/{id}/access
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<AccessGrantWithUser>>>> {
    require_view(&state.pool, auth.user_id, project_id).await?;
    let grants = ProjectAccessRepo::list_grants(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: grants }))
}

/// POST /api/v1/projects/{id}/access
///
/// Grants `role` to the registered user with `email`. An existing grant has
/// its role replaced.
pub async fn grant(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<GrantAccess>,
) -> AppResult<(StatusCode, Json<DataResponse<AccessGrant>>)> {
    require_edit(&state.pool, auth.user_id, project_id).await?;
    require_email("Email", input.email.trim())?;

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::NotFound("No user registered with this email".into()))?;

    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    if project.owner_id == user.id {
        return Err(AppError::BadRequest(
            "The project owner already has full access".into(),
        ));
    }

    let grant = ProjectAccessRepo::upsert_grant(&state.pool, project_id, user.id, input.role)
        .await?;
    tracing::info!(
        project_id,
        grantee_id = user.id,
        role = input.role.as_str(),
        "Access granted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: grant })))
}

/// DELETE /api/v1/projects/{id}/access/{user_id}
pub async fn revoke(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    require_edit(&state.pool, auth.user_id, project_id).await?;

    if ProjectAccessRepo::revoke(&state.pool, project_id, user_id).await? {
        tracing::info!(project_id, grantee_id = user_id, "Access revoked");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Access grant not found".into()))
    }
}
