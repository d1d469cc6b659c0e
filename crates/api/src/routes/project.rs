//! Route definitions for the `/projects` resource.
//!
//! Every project section is nested under `/projects/{id}/...`.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{
    access, callsheet, contract, moodboard, participant, project, results, selection,
};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                        -> list
/// POST   /                                        -> create
/// GET    /{id}                                    -> get_by_id
/// PUT    /{id}                                    -> update
/// DELETE /{id}                                    -> delete
/// GET    /{id}/role                               -> get_role
///
/// GET    /{id}/access                             -> access::list
/// POST   /{id}/access                             -> access::grant
/// DELETE /{id}/access/{user_id}                   -> access::revoke
///
/// GET    /{id}/participants                       -> participant::list
/// POST   /{id}/participants                       -> participant::create
/// PUT    /{id}/participants/{pid}                 -> participant::update
/// DELETE /{id}/participants/{pid}                 -> participant::delete
///
/// GET    /{id}/moodboard                          -> moodboard::get_board
/// POST   /{id}/moodboard/groups                   -> moodboard::create_group
/// PUT    /{id}/moodboard/groups/{gid}             -> moodboard::update_group
/// DELETE /{id}/moodboard/groups/{gid}             -> moodboard::delete_group
/// POST   /{id}/moodboard/groups/{gid}/images      -> moodboard::upload_images
/// POST   /{id}/moodboard/groups/{gid}/comments    -> moodboard::add_comment
///
/// GET    /{id}/contracts                          -> contract::list
/// POST   /{id}/contracts                          -> contract::create
/// GET    /{id}/contracts/{cid}                    -> contract::get_by_id
/// PUT    /{id}/contracts/{cid}                    -> contract::update
/// DELETE /{id}/contracts/{cid}                    -> contract::delete
/// POST   /{id}/contracts/{cid}/sign               -> contract::sign
///
/// GET    /{id}/selection                          -> selection::list
/// POST   /{id}/selection/images                   -> selection::upload_images
/// PUT    /{id}/selection/{iid}/rating             -> selection::rate
///
/// GET    /{id}/callsheet                          -> callsheet::get
/// PUT    /{id}/callsheet                          -> callsheet::upsert
/// POST   /{id}/callsheet/schedule                 -> callsheet::add_schedule_item
///
/// GET    /{id}/results                            -> results::list
/// POST   /{id}/results/folders                    -> results::create_folder
/// DELETE /{id}/results/folders/{fid}              -> results::delete_folder
/// POST   /{id}/results/folders/{fid}/images       -> results::upload_images
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/role", get(project::get_role))
        // Access grants
        .route("/{id}/access", get(access::list).post(access::grant))
        .route("/{id}/access/{user_id}", delete(access::revoke))
        // Participants
        .route(
            "/{id}/participants",
            get(participant::list).post(participant::create),
        )
        .route(
            "/{id}/participants/{pid}",
            put(participant::update).delete(participant::delete),
        )
        // Moodboard
        .route("/{id}/moodboard", get(moodboard::get_board))
        .route("/{id}/moodboard/groups", post(moodboard::create_group))
        .route(
            "/{id}/moodboard/groups/{gid}",
            put(moodboard::update_group).delete(moodboard::delete_group),
        )
        .route(
            "/{id}/moodboard/groups/{gid}/images",
            post(moodboard::upload_images),
        )
        .route(
            "/{id}/moodboard/groups/{gid}/comments",
            post(moodboard::add_comment),
        )
        // Contracts
        .route("/{id}/contracts", get(contract::list).post(contract::create))
        .route(
            "/{id}/contracts/{cid}",
            get(contract::get_by_id)
                .put(contract::update)
                .delete(contract::delete),
        )
        .route("/{id}/contracts/{cid}/sign", post(contract::sign))
        // Selection
        .route("/{id}/selection", get(selection::list))
        .route("/{id}/selection/images", post(selection::upload_images))
        .route("/{id}/selection/{iid}/rating", put(selection::rate))
        // Callsheet
        .route(
            "/{id}/callsheet",
            get(callsheet::get).put(callsheet::upsert),
        )
        .route(
            "/{id}/callsheet/schedule",
            post(callsheet::add_schedule_item),
        )
        // Results
        .route("/{id}/results", get(results::list))
        .route("/{id}/results/folders", post(results::create_folder))
        .route(
            "/{id}/results/folders/{fid}",
            delete(results::delete_folder),
        )
        .route(
            "/{id}/results/folders/{fid}/images",
            post(results::upload_images),
        )
}
