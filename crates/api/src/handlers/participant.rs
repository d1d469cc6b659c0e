//! Handlers for project participants.
//!
//! A participant's email is optional. When it matches a registered user the
//! row is linked to that user, which also grants them view access.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shootdesk_core::error::CoreError;
use shootdesk_core::types::DbId;
use shootdesk_core::validation::{
    optional_email, optional_text, require_text, MAX_LONG_TEXT_LEN, MAX_NAME_LEN,
    MAX_PARTICIPANT_ROLE_LEN, MAX_PHONE_LEN,
};
use shootdesk_db::models::participant::{CreateParticipant, Participant, UpdateParticipant};
use shootdesk_db::repositories::ParticipantRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::{require_edit, require_view};
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_details(
    email: Option<&str>,
    phone: Option<&str>,
    role: Option<&str>,
    notes: Option<&str>,
) -> Result<(), CoreError> {
    optional_email("Email", email.map(str::trim))?;
    optional_text("Phone", phone, MAX_PHONE_LEN)?;
    optional_text("Role", role, MAX_PARTICIPANT_ROLE_LEN)?;
    optional_text("Notes", notes, MAX_LONG_TEXT_LEN)
}

fn participant_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Participant",
        id,
    })
}

/// GET /api/v1/projects/{id}/participants
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Participant>>>> {
    require_view(&state.pool, auth.user_id, project_id).await?;
    let participants = ParticipantRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: participants }))
}

/// POST /api/v1/projects/{id}/participants
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateParticipant>,
) -> AppResult<(StatusCode, Json<DataResponse<Participant>>)> {
    require_edit(&state.pool, auth.user_id, project_id).await?;
    require_text("Name", &input.name, MAX_NAME_LEN)?;
    validate_details(
        input.email.as_deref(),
        input.phone.as_deref(),
        input.role.as_deref(),
        input.notes.as_deref(),
    )?;

    let participant = ParticipantRepo::create(&state.pool, project_id, &input).await?;
    tracing::debug!(
        project_id,
        participant_id = participant.id,
        linked_user = ?participant.user_id,
        "Participant added"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: participant })))
}

/// PUT /api/v1/projects/{id}/participants/{pid}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateParticipant>,
) -> AppResult<Json<DataResponse<Participant>>> {
    require_edit(&state.pool, auth.user_id, project_id).await?;
    if let Some(name) = &input.name {
        require_text("Name", name, MAX_NAME_LEN)?;
    }
    validate_details(
        input.email.as_deref(),
        input.phone.as_deref(),
        input.role.as_deref(),
        input.notes.as_deref(),
    )?;

    let participant = ParticipantRepo::update(&state.pool, project_id, id, &input)
        .await?
        .ok_or_else(|| participant_not_found(id))?;
    Ok(Json(DataResponse { data: participant }))
}

/// DELETE /api/v1/projects/{id}/participants/{pid}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    require_edit(&state.pool, auth.user_id, project_id).await?;
    if ParticipantRepo::delete(&state.pool, project_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(participant_not_found(id))
    }
}
