//! Route definitions for public short links.

use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/public`.
///
/// ```text
/// GET    /{short_code}                      -> view (optional auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{short_code}", get(public::view))
}
