//! Handlers for the image selection and per-user ratings.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shootdesk_core::error::CoreError;
use shootdesk_core::rating::{validate_stars, RatingColor};
use shootdesk_core::types::DbId;
use shootdesk_db::models::selection::{
    CreateSelectionImage, ImageRating, RateImage, SelectionFilter, SelectionImage,
    SelectionImageWithRating,
};
use shootdesk_db::repositories::SelectionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::{require_edit, require_view};
use crate::multipart::read_images;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::UploadModule;

/// Check stars and color and return the color in its column form.
fn validate_rating(
    stars: Option<i16>,
    color: Option<&str>,
) -> Result<Option<&'static str>, CoreError> {
    validate_stars(stars)?;
    color
        .map(|c| RatingColor::from_name(c).map(RatingColor::as_str))
        .transpose()
}

/// GET /api/v1/projects/{id}/selection?stars=&color=
///
/// Filters apply to the caller's own rating.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(filter): Query<SelectionFilter>,
) -> AppResult<Json<DataResponse<Vec<SelectionImageWithRating>>>> {
    require_view(&state.pool, auth.user_id, project_id).await?;
    validate_rating(filter.stars, filter.color.as_deref())?;

    let images =
        SelectionRepo::list_with_rating(&state.pool, project_id, auth.user_id, &filter).await?;
    Ok(Json(DataResponse { data: images }))
}

/// POST /api/v1/projects/{id}/selection/images
pub async fn upload_images(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<SelectionImage>>>)> {
    require_edit(&state.pool, auth.user_id, project_id).await?;

    let uploads = read_images(&mut multipart, &state.config.settings.uploads).await?;

    let mut created = Vec::with_capacity(uploads.len());
    for upload in &uploads {
        let stored = state
            .storage
            .save(
                UploadModule::Selection,
                project_id,
                None,
                &upload.original_name,
                &upload.bytes,
            )
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

        let image = SelectionRepo::create_image(
            &state.pool,
            &CreateSelectionImage {
                project_id,
                filename: stored.filename,
                path: stored.public_path,
                width: upload.width(),
                height: upload.height(),
                file_size: upload.size(),
            },
        )
        .await?;
        created.push(image);
    }

    tracing::info!(project_id, count = created.len(), "Selection images uploaded");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /api/v1/projects/{id}/selection/{iid}/rating
///
/// Replaces the caller's rating; `null` clears a field.
pub async fn rate(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, image_id)): Path<(DbId, DbId)>,
    Json(input): Json<RateImage>,
) -> AppResult<Json<DataResponse<ImageRating>>> {
    require_view(&state.pool, auth.user_id, project_id).await?;
    SelectionRepo::find_image(&state.pool, project_id, image_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SelectionImage",
            id: image_id,
        }))?;
    let color = validate_rating(input.stars, input.color.as_deref())?;

    let rating =
        SelectionRepo::upsert_rating(&state.pool, image_id, auth.user_id, input.stars, color)
            .await?;
    Ok(Json(DataResponse { data: rating }))
}
