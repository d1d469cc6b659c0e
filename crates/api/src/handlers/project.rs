//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use shootdesk_core::access::ProjectRole;
use shootdesk_core::error::CoreError;
use shootdesk_core::shortcode::{generate_short_code, MAX_SHORT_CODE_ATTEMPTS};
use shootdesk_core::types::DbId;
use shootdesk_core::validation::{
    optional_text, require_text, MAX_ADDRESS_LEN, MAX_LOCATION_LEN, MAX_LONG_TEXT_LEN,
    MAX_NAME_LEN,
};
use shootdesk_db::is_unique_violation;
use shootdesk_db::models::project::{
    CreateProject, Project, ProjectCounts, ProjectListItem, UpdateProject,
};
use shootdesk_db::repositories::{ProjectAccessRepo, ProjectRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::{require_edit, require_owner, require_view};
use crate::query::ListParams;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

const SHORT_CODE_CONSTRAINT: &str = "uq_projects_short_code";

/// A project with the caller's role and per-module item counts.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub role: ProjectRole,
    pub counts: ProjectCounts,
}

/// Response for `GET /projects/{id}/role`.
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub role: Option<ProjectRole>,
}

fn validate_create(input: &CreateProject) -> Result<(), CoreError> {
    require_text("Name", &input.name, MAX_NAME_LEN)?;
    optional_text("Description", input.description.as_deref(), MAX_LONG_TEXT_LEN)?;
    optional_text("Location", input.location.as_deref(), MAX_LOCATION_LEN)?;
    optional_text("Address", input.address.as_deref(), MAX_ADDRESS_LEN)
}

fn validate_update(input: &UpdateProject) -> Result<(), CoreError> {
    if let Some(name) = &input.name {
        require_text("Name", name, MAX_NAME_LEN)?;
    }
    optional_text("Description", input.description.as_deref(), MAX_LONG_TEXT_LEN)?;
    optional_text("Location", input.location.as_deref(), MAX_LOCATION_LEN)?;
    optional_text("Address", input.address.as_deref(), MAX_ADDRESS_LEN)
}

fn project_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// GET /api/v1/projects
///
/// Projects the caller reaches by any path, paginated and searchable by
/// name or location.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<PaginatedResponse<ProjectListItem>>> {
    let search = params.search();
    let items = ProjectRepo::list_accessible(
        &state.pool,
        auth.user_id,
        search,
        params.limit(),
        params.offset(),
    )
    .await?;
    let total = ProjectRepo::count_accessible(&state.pool, auth.user_id, search).await?;

    Ok(Json(PaginatedResponse::new(
        items,
        total,
        params.page(),
        params.limit(),
    )))
}

/// POST /api/v1/projects
///
/// The caller becomes the owner. A short code is drawn and inserted with up
/// to [`MAX_SHORT_CODE_ATTEMPTS`] tries; the unique constraint decides
/// collisions.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    validate_create(&input)?;

    let project = insert_with_short_code(&state, auth.user_id, &input).await?;
    tracing::info!(
        project_id = project.id,
        user_id = auth.user_id,
        short_code = %project.short_code,
        "Project created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

async fn insert_with_short_code(
    state: &AppState,
    owner_id: DbId,
    input: &CreateProject,
) -> AppResult<Project> {
    let config = &state.config.settings.short_code;
    let pool: &PgPool = &state.pool;

    for attempt in 1..=MAX_SHORT_CODE_ATTEMPTS {
        let code = generate_short_code(config);
        if ProjectRepo::short_code_exists(pool, &code).await? {
            tracing::debug!(attempt, "Short code taken, regenerating");
            continue;
        }
        match ProjectRepo::create(pool, owner_id, &code, input).await {
            Ok(project) => return Ok(project),
            Err(e) if is_unique_violation(&e, SHORT_CODE_CONSTRAINT) => {
                tracing::debug!(attempt, "Short code collided on insert, regenerating");
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::error!(owner_id, "Short code space exhausted");
    Err(AppError::Core(CoreError::Internal(format!(
        "Could not allocate a unique short code after {MAX_SHORT_CODE_ATTEMPTS} attempts"
    ))))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let source = require_view(&state.pool, auth.user_id, id).await?;
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    let counts = ProjectRepo::counts(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: ProjectDetail {
            project,
            role: source.role(),
            counts,
        },
    }))
}

/// PUT /api/v1/projects/{id}
///
/// Partial update. `public_modules` is merged key by key into the stored
/// flags.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    require_edit(&state.pool, auth.user_id, id).await?;
    validate_update(&input)?;

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| project_not_found(id))?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
///
/// Owner only. Rows cascade; the project's upload directories are removed
/// afterwards.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_owner(&state.pool, auth.user_id, id).await?;

    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(project_not_found(id));
    }
    state.storage.remove_project(id).await;

    tracing::info!(project_id = id, user_id = auth.user_id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/projects/{id}/role
///
/// `null` when the caller has no access or the project does not exist.
pub async fn get_role(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RoleResponse>>> {
    let role = ProjectAccessRepo::get_user_role(&state.pool, auth.user_id, id).await?;
    Ok(Json(DataResponse {
        data: RoleResponse { role },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(name: &str) -> CreateProject {
        CreateProject {
            name: name.to_string(),
            description: None,
            shoot_date: None,
            location: None,
            address: None,
        }
    }

    #[test]
    fn create_requires_name() {
        assert!(validate_create(&create_input("")).is_err());
        assert!(validate_create(&create_input("Spring Lookbook")).is_ok());
    }

    #[test]
    fn create_limits_location() {
        let mut input = create_input("Shoot");
        input.location = Some("x".repeat(MAX_LOCATION_LEN + 1));
        assert!(validate_create(&input).is_err());
    }

    #[test]
    fn update_allows_partial_input() {
        assert!(validate_update(&UpdateProject::default()).is_ok());
        let blank_name = UpdateProject {
            name: Some("  ".into()),
            ..Default::default()
        };
        assert!(validate_update(&blank_name).is_err());
    }
}
