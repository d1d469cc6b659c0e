//! Route definitions for the caller's profile and user lookup.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// GET    /profile                           -> get_profile
/// PUT    /profile                           -> update_profile
/// ```
pub fn profile_router() -> Router<AppState> {
    Router::new().route(
        "/profile",
        get(user::get_profile).put(user::update_profile),
    )
}

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /check?email=                      -> check_email
/// ```
pub fn lookup_router() -> Router<AppState> {
    Router::new().route("/check", get(user::check_email))
}
