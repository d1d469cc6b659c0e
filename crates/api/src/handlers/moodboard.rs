//! Handlers for the moodboard: groups of reference images with a review
//! status and comments.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use shootdesk_core::error::CoreError;
use shootdesk_core::types::DbId;
use shootdesk_core::validation::{
    optional_text, require_text, validate_moodboard_status, MAX_LONG_TEXT_LEN, MAX_NAME_LEN,
};
use shootdesk_db::models::moodboard::{
    CreateComment, CreateMoodboardGroup, CreateMoodboardImage, MoodboardComment, MoodboardGroup,
    MoodboardImage, UpdateMoodboardGroup,
};
use shootdesk_db::repositories::MoodboardRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::{require_edit, require_view};
use crate::multipart::read_images;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::UploadModule;

/// A group with its images and comments, as rendered on the board.
#[derive(Debug, Serialize)]
pub struct MoodboardGroupView {
    #[serde(flatten)]
    pub group: MoodboardGroup,
    pub images: Vec<MoodboardImage>,
    pub comments: Vec<MoodboardComment>,
}

/// Attach images and comments to their groups, keeping the group order.
pub(crate) fn assemble_board(
    groups: Vec<MoodboardGroup>,
    images: Vec<MoodboardImage>,
    comments: Vec<MoodboardComment>,
) -> Vec<MoodboardGroupView> {
    let mut images_by_group: HashMap<DbId, Vec<MoodboardImage>> = HashMap::new();
    for image in images {
        images_by_group.entry(image.group_id).or_default().push(image);
    }
    let mut comments_by_group: HashMap<DbId, Vec<MoodboardComment>> = HashMap::new();
    for comment in comments {
        comments_by_group
            .entry(comment.group_id)
            .or_default()
            .push(comment);
    }

    groups
        .into_iter()
        .map(|group| MoodboardGroupView {
            images: images_by_group.remove(&group.id).unwrap_or_default(),
            comments: comments_by_group.remove(&group.id).unwrap_or_default(),
            group,
        })
        .collect()
}

/// Load the whole board of a project.
pub(crate) async fn load_board(
    pool: &PgPool,
    project_id: DbId,
) -> Result<Vec<MoodboardGroupView>, sqlx::Error> {
    let groups = MoodboardRepo::list_groups(pool, project_id).await?;
    let images = MoodboardRepo::list_images(pool, project_id).await?;
    let comments = MoodboardRepo::list_comments(pool, project_id).await?;
    Ok(assemble_board(groups, images, comments))
}

async fn ensure_group_exists(
    pool: &PgPool,
    project_id: DbId,
    id: DbId,
) -> AppResult<MoodboardGroup> {
    MoodboardRepo::find_group(pool, project_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MoodboardGroup",
            id,
        }))
}

/// GET /api/v1/projects/{id}/moodboard
pub async fn get_board(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<MoodboardGroupView>>>> {
    require_view(&state.pool, auth.user_id, project_id).await?;
    let board = load_board(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: board }))
}

/// POST /api/v1/projects/{id}/moodboard/groups
pub async fn create_group(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateMoodboardGroup>,
) -> AppResult<(StatusCode, Json<DataResponse<MoodboardGroup>>)> {
    require_edit(&state.pool, auth.user_id, project_id).await?;
    require_text("Name", &input.name, MAX_NAME_LEN)?;
    optional_text("Description", input.description.as_deref(), MAX_LONG_TEXT_LEN)?;

    let group = MoodboardRepo::create_group(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: group })))
}

/// PUT /api/v1/projects/{id}/moodboard/groups/{gid}
pub async fn update_group(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateMoodboardGroup>,
) -> AppResult<Json<DataResponse<MoodboardGroup>>> {
    require_edit(&state.pool, auth.user_id, project_id).await?;
    if let Some(name) = &input.name {
        require_text("Name", name, MAX_NAME_LEN)?;
    }
    optional_text("Description", input.description.as_deref(), MAX_LONG_TEXT_LEN)?;
    if let Some(status) = &input.status {
        validate_moodboard_status(status)?;
    }

    let group = MoodboardRepo::update_group(&state.pool, project_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MoodboardGroup",
            id,
        }))?;
    Ok(Json(DataResponse { data: group }))
}

/// DELETE /api/v1/projects/{id}/moodboard/groups/{gid}
pub async fn delete_group(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    require_edit(&state.pool, auth.user_id, project_id).await?;
    if MoodboardRepo::delete_group(&state.pool, project_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "MoodboardGroup",
            id,
        }))
    }
}

/// POST /api/v1/projects/{id}/moodboard/groups/{gid}/images
///
/// Multipart upload; every `file` field becomes an image appended to the
/// group.
pub async fn upload_images(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, group_id)): Path<(DbId, DbId)>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<MoodboardImage>>>)> {
    require_edit(&state.pool, auth.user_id, project_id).await?;
    ensure_group_exists(&state.pool, project_id, group_id).await?;

    let uploads = read_images(&mut multipart, &state.config.settings.uploads).await?;

    let mut created = Vec::with_capacity(uploads.len());
    for upload in &uploads {
        let stored = state
            .storage
            .save(
                UploadModule::Moodboard,
                project_id,
                Some(group_id),
                &upload.original_name,
                &upload.bytes,
            )
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

        let image = MoodboardRepo::create_image(
            &state.pool,
            &CreateMoodboardImage {
                group_id,
                filename: stored.filename,
                path: stored.public_path,
                width: upload.width(),
                height: upload.height(),
            },
        )
        .await?;
        created.push(image);
    }

    tracing::info!(project_id, group_id, count = created.len(), "Moodboard images uploaded");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// POST /api/v1/projects/{id}/moodboard/groups/{gid}/comments
///
/// Any member may comment, including view-only participants.
pub async fn add_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, group_id)): Path<(DbId, DbId)>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<DataResponse<MoodboardComment>>)> {
    require_view(&state.pool, auth.user_id, project_id).await?;
    ensure_group_exists(&state.pool, project_id, group_id).await?;
    require_text("Comment", &input.content, MAX_LONG_TEXT_LEN)?;

    let comment =
        MoodboardRepo::create_comment(&state.pool, group_id, auth.user_id, &input.content).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}
