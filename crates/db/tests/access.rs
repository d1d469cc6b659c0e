//! Integration tests for project access resolution.
//!
//! Covers the three access paths (ownership, explicit grant, participant
//! email match), their precedence, and default-deny for missing rows.

use shootdesk_core::access::{AccessSource, GrantRole, ProjectRole};
use shootdesk_db::models::participant::{CreateParticipant, UpdateParticipant};
use shootdesk_db::models::project::{CreateProject, Project};
use shootdesk_db::models::user::{CreateUser, User};
use shootdesk_db::repositories::{ParticipantRepo, ProjectAccessRepo, ProjectRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn user(pool: &PgPool, email: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            name: email.split('@').next().unwrap().to_string(),
            password_hash: None,
        },
    )
    .await
    .unwrap()
}

async fn project(pool: &PgPool, owner: &User, code: &str) -> Project {
    ProjectRepo::create(
        pool,
        owner.id,
        code,
        &CreateProject {
            name: "Autumn Lookbook".to_string(),
            description: None,
            shoot_date: None,
            location: Some("Hamburg".to_string()),
            address: None,
        },
    )
    .await
    .unwrap()
}

fn participant(email: Option<&str>) -> CreateParticipant {
    CreateParticipant {
        name: "Model".to_string(),
        email: email.map(str::to_string),
        phone: None,
        role: Some("Model".to_string()),
        notes: None,
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_owner_has_full_access(pool: PgPool) {
    let owner = user(&pool, "owner@studio.test").await;
    let p = project(&pool, &owner, "aaaaaaa1").await;

    assert!(ProjectAccessRepo::can_access_project(&pool, owner.id, p.id).await.unwrap());
    assert!(ProjectAccessRepo::can_edit_project(&pool, owner.id, p.id).await.unwrap());
    assert_eq!(
        ProjectAccessRepo::get_user_role(&pool, owner.id, p.id).await.unwrap(),
        Some(ProjectRole::Owner)
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_editor_grant(pool: PgPool) {
    let owner = user(&pool, "owner@studio.test").await;
    let editor = user(&pool, "editor@studio.test").await;
    let p = project(&pool, &owner, "aaaaaaa2").await;
    ProjectAccessRepo::upsert_grant(&pool, p.id, editor.id, GrantRole::Editor)
        .await
        .unwrap();

    assert!(ProjectAccessRepo::can_access_project(&pool, editor.id, p.id).await.unwrap());
    assert!(ProjectAccessRepo::can_edit_project(&pool, editor.id, p.id).await.unwrap());
    assert_eq!(
        ProjectAccessRepo::get_user_role(&pool, editor.id, p.id).await.unwrap(),
        Some(ProjectRole::Editor)
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_viewer_grant_cannot_edit(pool: PgPool) {
    let owner = user(&pool, "owner@studio.test").await;
    let viewer = user(&pool, "viewer@studio.test").await;
    let p = project(&pool, &owner, "aaaaaaa3").await;
    ProjectAccessRepo::upsert_grant(&pool, p.id, viewer.id, GrantRole::Viewer)
        .await
        .unwrap();

    assert!(ProjectAccessRepo::can_access_project(&pool, viewer.id, p.id).await.unwrap());
    assert!(!ProjectAccessRepo::can_edit_project(&pool, viewer.id, p.id).await.unwrap());
    assert_eq!(
        ProjectAccessRepo::get_user_role(&pool, viewer.id, p.id).await.unwrap(),
        Some(ProjectRole::Viewer)
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_participant_email_match_is_case_insensitive_and_view_only(pool: PgPool) {
    let owner = user(&pool, "owner@studio.test").await;
    let model = user(&pool, "model@agency.test").await;
    let p = project(&pool, &owner, "aaaaaaa4").await;
    ParticipantRepo::create(&pool, p.id, &participant(Some("Model@Agency.TEST")))
        .await
        .unwrap();

    assert_eq!(
        ProjectAccessRepo::resolve(&pool, model.id, p.id).await.unwrap(),
        Some(AccessSource::ParticipantMatch)
    );
    assert!(ProjectAccessRepo::can_access_project(&pool, model.id, p.id).await.unwrap());
    assert!(!ProjectAccessRepo::can_edit_project(&pool, model.id, p.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_participant_created_before_registration_matches_later(pool: PgPool) {
    let owner = user(&pool, "owner@studio.test").await;
    let p = project(&pool, &owner, "aaaaaaa5").await;
    let created = ParticipantRepo::create(&pool, p.id, &participant(Some("late@agency.test")))
        .await
        .unwrap();
    assert_eq!(created.user_id, None);

    let late = user(&pool, "late@agency.test").await;
    assert_eq!(
        ProjectAccessRepo::get_user_role(&pool, late.id, p.id).await.unwrap(),
        Some(ProjectRole::Viewer)
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_participant_auto_links_registered_user(pool: PgPool) {
    let owner = user(&pool, "owner@studio.test").await;
    let model = user(&pool, "model@agency.test").await;
    let p = project(&pool, &owner, "aaaaaaa6").await;

    let created = ParticipantRepo::create(&pool, p.id, &participant(Some(" MODEL@agency.test ")))
        .await
        .unwrap();
    assert_eq!(created.user_id, Some(model.id));

    let updated = ParticipantRepo::update(
        &pool,
        p.id,
        created.id,
        &UpdateParticipant {
            email: Some(String::new()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.email, None);
    assert_eq!(updated.user_id, None);
    assert!(!ProjectAccessRepo::can_access_project(&pool, model.id, p.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_participant_email_matches_nobody(pool: PgPool) {
    let owner = user(&pool, "owner@studio.test").await;
    let other = user(&pool, "other@studio.test").await;
    let p = project(&pool, &owner, "aaaaaaa7").await;
    ParticipantRepo::create(&pool, p.id, &participant(Some(""))).await.unwrap();
    ParticipantRepo::create(&pool, p.id, &participant(None)).await.unwrap();

    assert_eq!(ProjectAccessRepo::resolve(&pool, other.id, p.id).await.unwrap(), None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_grant_takes_precedence_over_participant_match(pool: PgPool) {
    let owner = user(&pool, "owner@studio.test").await;
    let editor = user(&pool, "editor@studio.test").await;
    let p = project(&pool, &owner, "aaaaaaa8").await;
    ParticipantRepo::create(&pool, p.id, &participant(Some("editor@studio.test")))
        .await
        .unwrap();
    ProjectAccessRepo::upsert_grant(&pool, p.id, editor.id, GrantRole::Editor)
        .await
        .unwrap();

    assert_eq!(
        ProjectAccessRepo::resolve(&pool, editor.id, p.id).await.unwrap(),
        Some(AccessSource::Grant(GrantRole::Editor))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unrelated_user_and_missing_rows_are_denied(pool: PgPool) {
    let owner = user(&pool, "owner@studio.test").await;
    let stranger = user(&pool, "stranger@studio.test").await;
    let p = project(&pool, &owner, "aaaaaaa9").await;

    assert!(!ProjectAccessRepo::can_access_project(&pool, stranger.id, p.id).await.unwrap());
    assert_eq!(
        ProjectAccessRepo::get_user_role(&pool, stranger.id, p.id).await.unwrap(),
        None
    );
    // Unknown project and unknown user.
    assert!(!ProjectAccessRepo::can_access_project(&pool, owner.id, p.id + 1000).await.unwrap());
    assert!(!ProjectAccessRepo::can_access_project(&pool, owner.id + 1000, p.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Grants
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upsert_grant_updates_role_in_place(pool: PgPool) {
    let owner = user(&pool, "owner@studio.test").await;
    let member = user(&pool, "member@studio.test").await;
    let p = project(&pool, &owner, "bbbbbbb1").await;

    let first = ProjectAccessRepo::upsert_grant(&pool, p.id, member.id, GrantRole::Viewer)
        .await
        .unwrap();
    let second = ProjectAccessRepo::upsert_grant(&pool, p.id, member.id, GrantRole::Editor)
        .await
        .unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.role, "EDITOR");

    let grants = ProjectAccessRepo::list_grants(&pool, p.id).await.unwrap();
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0].user_email, "member@studio.test");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revoke_grant(pool: PgPool) {
    let owner = user(&pool, "owner@studio.test").await;
    let member = user(&pool, "member@studio.test").await;
    let p = project(&pool, &owner, "bbbbbbb2").await;
    ProjectAccessRepo::upsert_grant(&pool, p.id, member.id, GrantRole::Viewer)
        .await
        .unwrap();

    assert!(ProjectAccessRepo::revoke(&pool, p.id, member.id).await.unwrap());
    assert!(!ProjectAccessRepo::revoke(&pool, p.id, member.id).await.unwrap());
    assert!(!ProjectAccessRepo::can_access_project(&pool, member.id, p.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_grant_role_is_rejected_by_schema(pool: PgPool) {
    let owner = user(&pool, "owner@studio.test").await;
    let member = user(&pool, "member@studio.test").await;
    let p = project(&pool, &owner, "bbbbbbb3").await;

    let result = sqlx::query(
        "INSERT INTO project_access (project_id, user_id, role) VALUES ($1, $2, 'OWNER')",
    )
    .bind(p.id)
    .bind(member.id)
    .execute(&pool)
    .await;
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_accessible_covers_every_path(pool: PgPool) {
    let owner = user(&pool, "owner@studio.test").await;
    let member = user(&pool, "member@studio.test").await;
    let owned = project(&pool, &owner, "ccccccc1").await;
    let granted = project(&pool, &owner, "ccccccc2").await;
    let matched = project(&pool, &owner, "ccccccc3").await;
    let _hidden = project(&pool, &owner, "ccccccc4").await;
    let own = project(&pool, &member, "ccccccc5").await;

    ProjectAccessRepo::upsert_grant(&pool, granted.id, member.id, GrantRole::Viewer)
        .await
        .unwrap();
    ParticipantRepo::create(&pool, matched.id, &participant(Some("member@studio.test")))
        .await
        .unwrap();

    let items = ProjectRepo::list_accessible(&pool, member.id, None, 50, 0)
        .await
        .unwrap();
    let mut ids: Vec<_> = items.iter().map(|i| i.project.id).collect();
    ids.sort_unstable();
    let mut expected = vec![granted.id, matched.id, own.id];
    expected.sort_unstable();
    assert_eq!(ids, expected);
    assert!(!ids.contains(&owned.id));

    let total = ProjectRepo::count_accessible(&pool, member.id, None).await.unwrap();
    assert_eq!(total, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_accessible_search(pool: PgPool) {
    let owner = user(&pool, "owner@studio.test").await;
    project(&pool, &owner, "ddddddd1").await;

    let hits = ProjectRepo::list_accessible(&pool, owner.id, Some("hamb"), 50, 0)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].owner_name, "owner");

    let misses = ProjectRepo::count_accessible(&pool, owner.id, Some("Berlin"))
        .await
        .unwrap();
    assert_eq!(misses, 0);
}
