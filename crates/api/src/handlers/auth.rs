//! Handlers for the `/auth` resource.
//!
//! Sign-in and token issuance belong to the external auth provider; this
//! service only registers accounts for it to verify against.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use shootdesk_core::validation::{
    normalize_email, require_email, require_text_between, validate_password_strength,
    MAX_NAME_LEN, MIN_DISPLAY_NAME_LEN,
};
use shootdesk_db::models::user::{CreateUser, UserResponse};
use shootdesk_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// POST /api/v1/auth/register
///
/// A taken email fails with 409 via `uq_users_email`.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let email = normalize_email(&input.email);
    require_email("Email", &email)?;
    require_text_between("Name", &input.name, MIN_DISPLAY_NAME_LEN, MAX_NAME_LEN)?;
    validate_password_strength(&input.password)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            name: input.name.trim().to_string(),
            password_hash: Some(password_hash),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(user),
        }),
    ))
}
