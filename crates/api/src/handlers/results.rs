//! Handlers for delivered results: a folder tree with images.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use shootdesk_core::error::CoreError;
use shootdesk_core::types::DbId;
use shootdesk_core::validation::validate_folder_name;
use shootdesk_db::models::result::{
    CreateResultFolder, CreateResultImage, ResultFolder, ResultImage,
};
use shootdesk_db::repositories::ResultRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::{require_edit, require_view};
use crate::multipart::read_images;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::UploadModule;

#[derive(Debug, Serialize)]
pub struct ResultFolderView {
    #[serde(flatten)]
    pub folder: ResultFolder,
    pub images: Vec<ResultImage>,
}

/// All folders of a project, parents first, each with its images.
pub(crate) async fn load_folders(
    pool: &PgPool,
    project_id: DbId,
) -> Result<Vec<ResultFolderView>, sqlx::Error> {
    let folders = ResultRepo::list_folders(pool, project_id).await?;
    let mut images: HashMap<DbId, Vec<ResultImage>> = HashMap::new();
    for image in ResultRepo::list_images(pool, project_id).await? {
        images.entry(image.folder_id).or_default().push(image);
    }
    Ok(folders
        .into_iter()
        .map(|folder| ResultFolderView {
            images: images.remove(&folder.id).unwrap_or_default(),
            folder,
        })
        .collect())
}

async fn ensure_folder_exists(
    pool: &PgPool,
    project_id: DbId,
    id: DbId,
) -> AppResult<ResultFolder> {
    ResultRepo::find_folder(pool, project_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ResultFolder",
            id,
        }))
}

/// GET /api/v1/projects/{id}/results
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ResultFolderView>>>> {
    require_view(&state.pool, auth.user_id, project_id).await?;
    let folders = load_folders(&state.pool, project_id).await?;
    Ok(Json(DataResponse { data: folders }))
}

/// POST /api/v1/projects/{id}/results/folders
///
/// The parent, when given, must belong to the same project.
pub async fn create_folder(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateResultFolder>,
) -> AppResult<(StatusCode, Json<DataResponse<ResultFolder>>)> {
    require_edit(&state.pool, auth.user_id, project_id).await?;
    validate_folder_name(&input.name)?;

    let parent = match input.parent_id {
        Some(parent_id) => Some(ensure_folder_exists(&state.pool, project_id, parent_id).await?),
        None => None,
    };

    let folder =
        ResultRepo::create_folder(&state.pool, project_id, parent.as_ref(), &input.name).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: folder })))
}

/// DELETE /api/v1/projects/{id}/results/folders/{fid}
pub async fn delete_folder(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    require_edit(&state.pool, auth.user_id, project_id).await?;
    if ResultRepo::delete_folder(&state.pool, project_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ResultFolder",
            id,
        }))
    }
}

/// POST /api/v1/projects/{id}/results/folders/{fid}/images
pub async fn upload_images(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, folder_id)): Path<(DbId, DbId)>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<ResultImage>>>)> {
    require_edit(&state.pool, auth.user_id, project_id).await?;
    ensure_folder_exists(&state.pool, project_id, folder_id).await?;

    let uploads = read_images(&mut multipart, &state.config.settings.uploads).await?;

    let mut created = Vec::with_capacity(uploads.len());
    for upload in &uploads {
        let stored = state
            .storage
            .save(
                UploadModule::Results,
                project_id,
                Some(folder_id),
                &upload.original_name,
                &upload.bytes,
            )
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

        let image = ResultRepo::create_image(
            &state.pool,
            &CreateResultImage {
                folder_id,
                filename: stored.filename,
                path: stored.public_path,
                width: upload.width(),
                height: upload.height(),
            },
        )
        .await?;
        created.push(image);
    }

    tracing::info!(project_id, folder_id, count = created.len(), "Result images uploaded");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}
