//! Handlers for the caller's own profile and user lookup.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;
use shootdesk_core::error::CoreError;
use shootdesk_core::validation::{
    optional_text, require_text_between, MAX_LONG_TEXT_LEN, MAX_NAME_LEN, MAX_PHONE_LEN,
    MIN_DISPLAY_NAME_LEN,
};
use shootdesk_db::models::user::{UpdateProfile, UserResponse, UserSummary};
use shootdesk_db::repositories::{ParticipantRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::EmailQuery;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for `GET /users/check`.
#[derive(Debug, Serialize)]
pub struct EmailCheck {
    pub found: bool,
    pub user: Option<UserSummary>,
}

/// GET /api/v1/user/profile
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// PUT /api/v1/user/profile
///
/// Replaces the profile fields and copies name, phone and profession onto
/// every participant row linked to the caller.
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    require_text_between("Name", &input.name, MIN_DISPLAY_NAME_LEN, MAX_NAME_LEN)?;
    optional_text("Phone", input.phone.as_deref(), MAX_PHONE_LEN)?;
    optional_text("Profession", input.profession.as_deref(), MAX_NAME_LEN)?;
    optional_text("Bio", input.bio.as_deref(), MAX_LONG_TEXT_LEN)?;

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let synced = ParticipantRepo::sync_profile(
        &state.pool,
        user.id,
        &user.name,
        user.phone.as_deref(),
        user.profession.as_deref(),
    )
    .await?;
    tracing::debug!(user_id = user.id, participants = synced, "Profile synced to participants");

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

/// GET /api/v1/users/check?email=
pub async fn check_email(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<EmailQuery>,
) -> AppResult<Json<DataResponse<EmailCheck>>> {
    let user = UserRepo::find_by_email(&state.pool, &params.email).await?;
    let user = user.map(|u| UserSummary {
        id: u.id,
        name: u.name,
        email: u.email,
        image: u.image,
    });
    Ok(Json(DataResponse {
        data: EmailCheck {
            found: user.is_some(),
            user,
        },
    }))
}
