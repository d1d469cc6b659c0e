pub mod auth;
pub mod health;
pub mod project;
pub mod public;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
///
/// /user/profile                                    get, update own profile
/// /users/check?email=                              look up a user by email
///
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
/// /projects/{id}/role                              caller's role
/// /projects/{id}/access[/{user_id}]                grants
/// /projects/{id}/participants[/{pid}]              participants
/// /projects/{id}/moodboard/...                     moodboard groups, images, comments
/// /projects/{id}/contracts[/{cid}[/sign]]          contracts and signatures
/// /projects/{id}/selection/...                     selection images and ratings
/// /projects/{id}/callsheet[/schedule]              callsheet and schedule
/// /projects/{id}/results/...                       result folders and images
///
/// /public/{short_code}                             public project page (optional auth)
///
/// /uploads/*                                       stored images (mounted by the app router)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/user", user::profile_router())
        .nest("/users", user::lookup_router())
        .nest("/projects", project::router())
        .nest("/public", public::router())
}
