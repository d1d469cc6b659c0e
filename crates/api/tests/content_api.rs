//! Project content sections: moodboard, selection, contracts, callsheet,
//! results, plus registration and profile sync.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{
    body_json, create_project_id, get_auth, post_files_auth, post_json, post_json_auth,
    put_json_auth, signed_in_user, TINY_PNG,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Moodboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn moodboard_groups_follow_sort_order(pool: PgPool) {
    let (_, anna) = signed_in_user(&pool, "anna@studio.de", "Anna").await;
    let app = common::build_test_app(pool);
    let id = create_project_id(app.clone(), &anna, "Shoot").await;
    let groups_uri = format!("/api/v1/projects/{id}/moodboard/groups");

    let first = body_json(
        post_json_auth(app.clone(), &groups_uri, json!({ "name": "Hair" }), &anna).await,
    )
    .await["data"]["id"]
        .as_i64()
        .unwrap();
    post_json_auth(app.clone(), &groups_uri, json!({ "name": "Makeup" }), &anna).await;

    let response = put_json_auth(
        app.clone(),
        &format!("{groups_uri}/{first}"),
        json!({ "sort_order": 10, "status": "ACCEPTED" }),
        &anna,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, &format!("/api/v1/projects/{id}/moodboard"), &anna).await;
    let board = body_json(response).await;
    let names: Vec<&str> = board["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Makeup", "Hair"]);
    assert_eq!(board["data"][1]["status"], "ACCEPTED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_moodboard_status_is_rejected(pool: PgPool) {
    let (_, anna) = signed_in_user(&pool, "anna@studio.de", "Anna").await;
    let app = common::build_test_app(pool);
    let id = create_project_id(app.clone(), &anna, "Shoot").await;
    let groups_uri = format!("/api/v1/projects/{id}/moodboard/groups");
    let group = body_json(
        post_json_auth(app.clone(), &groups_uri, json!({ "name": "Hair" }), &anna).await,
    )
    .await["data"]["id"]
        .as_i64()
        .unwrap();

    let response = put_json_auth(
        app,
        &format!("{groups_uri}/{group}"),
        json!({ "status": "MAYBE" }),
        &anna,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn participant_can_comment_but_not_create_groups(pool: PgPool) {
    let (_, anna) = signed_in_user(&pool, "anna@studio.de", "Anna").await;
    let (_, mia) = signed_in_user(&pool, "mia@models.de", "Mia").await;
    let app = common::build_test_app(pool);
    let id = create_project_id(app.clone(), &anna, "Shoot").await;
    post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{id}/participants"),
        json!({ "name": "Mia", "email": "mia@models.de" }),
        &anna,
    )
    .await;
    let groups_uri = format!("/api/v1/projects/{id}/moodboard/groups");
    let group = body_json(
        post_json_auth(app.clone(), &groups_uri, json!({ "name": "Looks" }), &anna).await,
    )
    .await["data"]["id"]
        .as_i64()
        .unwrap();

    let response = post_json_auth(
        app.clone(),
        &format!("{groups_uri}/{group}/comments"),
        json!({ "content": "Love the second look" }),
        &mia,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["user_name"], "Mia");

    let response =
        post_json_auth(app, &groups_uri, json!({ "name": "Mine" }), &mia).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn moodboard_upload_stores_file_with_dimensions(pool: PgPool) {
    let (_, anna) = signed_in_user(&pool, "anna@studio.de", "Anna").await;
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app_with_config(pool, common::test_config(tmp.path().to_path_buf()));
    let id = create_project_id(app.clone(), &anna, "Shoot").await;
    let groups_uri = format!("/api/v1/projects/{id}/moodboard/groups");
    let group = body_json(
        post_json_auth(app.clone(), &groups_uri, json!({ "name": "Looks" }), &anna).await,
    )
    .await["data"]["id"]
        .as_i64()
        .unwrap();

    let response = post_files_auth(
        app.clone(),
        &format!("{groups_uri}/{group}/images"),
        &[("look.png", "image/png", TINY_PNG)],
        &anna,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let image = &json["data"][0];
    assert_eq!(image["width"], 1);
    assert_eq!(image["height"], 1);

    let public_path = image["path"].as_str().unwrap();
    let relative = public_path
        .strip_prefix("/api/v1/uploads/")
        .expect("served under the uploads prefix");
    assert!(relative.starts_with(&format!("moodboard/{id}/{group}/")));
    assert!(tmp.path().join(relative).is_file());

    let response = common::get(app, public_path).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_with_wrong_mime_is_rejected(pool: PgPool) {
    let (_, anna) = signed_in_user(&pool, "anna@studio.de", "Anna").await;
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app_with_config(pool, common::test_config(tmp.path().to_path_buf()));
    let id = create_project_id(app.clone(), &anna, "Shoot").await;

    let response = post_files_auth(
        app,
        &format!("/api/v1/projects/{id}/selection/images"),
        &[("look.png", "text/html", TINY_PNG)],
        &anna,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn ratings_are_per_user_and_filterable(pool: PgPool) {
    let (_, anna) = signed_in_user(&pool, "anna@studio.de", "Anna").await;
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app_with_config(pool, common::test_config(tmp.path().to_path_buf()));
    let id = create_project_id(app.clone(), &anna, "Shoot").await;

    let response = post_files_auth(
        app.clone(),
        &format!("/api/v1/projects/{id}/selection/images"),
        &[("a.png", "image/png", TINY_PNG), ("b.png", "image/png", TINY_PNG)],
        &anna,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let images = json["data"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    let rated = images[0]["id"].as_i64().unwrap();

    let rating_uri = format!("/api/v1/projects/{id}/selection/{rated}/rating");
    let response = put_json_auth(
        app.clone(),
        &rating_uri,
        json!({ "stars": 4, "color": "GREEN" }),
        &anna,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json_auth(app.clone(), &rating_uri, json!({ "stars": 9 }), &anna).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let list_uri = format!("/api/v1/projects/{id}/selection");
    let json = body_json(get_auth(app.clone(), &format!("{list_uri}?stars=4"), &anna).await).await;
    let filtered = json["data"].as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["id"], rated);
    assert_eq!(filtered[0]["color"], "GREEN");

    let json = body_json(get_auth(app.clone(), &format!("{list_uri}?color=RED"), &anna).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    let response = put_json_auth(
        app,
        &format!("/api/v1/projects/{id}/selection/999999/rating"),
        json!({ "stars": 3 }),
        &anna,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Contracts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn signing_records_request_metadata(pool: PgPool) {
    let (_, anna) = signed_in_user(&pool, "anna@studio.de", "Anna").await;
    let app = common::build_test_app(pool);
    let id = create_project_id(app.clone(), &anna, "Shoot").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{id}/contracts"),
        json!({ "title": "Model Release", "content": "The model grants ..." }),
        &anna,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let contract = body_json(response).await["data"]["id"].as_i64().unwrap();

    let body = json!({ "signature": "data:image/png;base64,AAAA", "name": "Anna", "email": "anna@studio.de" });
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/v1/projects/{id}/contracts/{contract}/sign"))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {anna}"))
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .header("user-agent", "shootdesk-tests")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = common::send(app.clone(), request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["ip_address"], "203.0.113.7");
    assert_eq!(json["data"]["user_agent"], "shootdesk-tests");

    let response = get_auth(
        app,
        &format!("/api/v1/projects/{id}/contracts/{contract}"),
        &anna,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Model Release");
    assert_eq!(json["data"]["signatures"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Callsheet
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn callsheet_upsert_keeps_omitted_fields(pool: PgPool) {
    let (_, anna) = signed_in_user(&pool, "anna@studio.de", "Anna").await;
    let app = common::build_test_app(pool);
    let id = create_project_id(app.clone(), &anna, "Shoot").await;
    let uri = format!("/api/v1/projects/{id}/callsheet");

    let response = get_auth(app.clone(), &uri, &anna).await;
    assert!(body_json(response).await["data"].is_null());

    put_json_auth(
        app.clone(),
        &uri,
        json!({ "location_name": "Studio 4", "dresscode": "Black" }),
        &anna,
    )
    .await;
    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({ "parking_info": "Courtyard" }),
        &anna,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get_auth(app, &uri, &anna).await).await;
    assert_eq!(json["data"]["location_name"], "Studio 4");
    assert_eq!(json["data"]["dresscode"], "Black");
    assert_eq!(json["data"]["parking_info"], "Courtyard");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn schedule_item_creates_callsheet(pool: PgPool) {
    let (_, anna) = signed_in_user(&pool, "anna@studio.de", "Anna").await;
    let app = common::build_test_app(pool);
    let id = create_project_id(app.clone(), &anna, "Shoot").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{id}/callsheet/schedule"),
        json!({ "time": "2026-05-02T09:00:00Z", "duration_mins": 45, "activity": "Hair & makeup" }),
        &anna,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get_auth(app, &format!("/api/v1/projects/{id}/callsheet"), &anna).await).await;
    let schedule = json["data"]["schedule"].as_array().unwrap();
    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule[0]["activity"], "Hair & makeup");
    assert_eq!(schedule[0]["duration_mins"], 45);
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn result_folders_nest_within_a_project(pool: PgPool) {
    let (_, anna) = signed_in_user(&pool, "anna@studio.de", "Anna").await;
    let app = common::build_test_app(pool);
    let id = create_project_id(app.clone(), &anna, "Shoot").await;
    let other = create_project_id(app.clone(), &anna, "Other").await;
    let folders_uri = format!("/api/v1/projects/{id}/results/folders");

    let finals = body_json(
        post_json_auth(app.clone(), &folders_uri, json!({ "name": "Finals" }), &anna).await,
    )
    .await["data"]["id"]
        .as_i64()
        .unwrap();

    let response = post_json_auth(
        app.clone(),
        &folders_uri,
        json!({ "name": "Retouched", "parent_id": finals }),
        &anna,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["path"], "/Finals/Retouched");

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{other}/results/folders"),
        json!({ "name": "Stolen", "parent_id": finals }),
        &anna,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(app, &folders_uri, json!({ "name": "a/b" }), &anna).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_normalizes_email_and_rejects_duplicates(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "email": "  Nora@Studio.DE ", "name": "Nora", "password": "secret123" });

    let response = post_json(app.clone(), "/api/v1/auth/register", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "nora@studio.de");
    assert!(json["data"].get("password_hash").is_none());

    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_update_syncs_linked_participants(pool: PgPool) {
    let (_, anna) = signed_in_user(&pool, "anna@studio.de", "Anna").await;
    let (mia_id, mia) = signed_in_user(&pool, "mia@models.de", "Mia").await;
    let app = common::build_test_app(pool);
    let id = create_project_id(app.clone(), &anna, "Shoot").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{id}/participants"),
        json!({ "name": "M.", "email": "mia@models.de" }),
        &anna,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["user_id"], mia_id);

    let response = put_json_auth(
        app.clone(),
        "/api/v1/user/profile",
        json!({ "name": "Mia Berg", "phone": "+49 170 000", "profession": "Model" }),
        &mia,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get_auth(app, &format!("/api/v1/projects/{id}/participants"), &anna).await).await;
    let participant = &json["data"][0];
    assert_eq!(participant["name"], "Mia Berg");
    assert_eq!(participant["phone"], "+49 170 000");
    assert_eq!(participant["role"], "Model");
}
