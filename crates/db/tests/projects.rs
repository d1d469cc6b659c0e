//! Integration tests for project rows: short code uniqueness, module flag
//! merging, cascades.

use std::collections::BTreeMap;

use shootdesk_core::public_view::{ModuleFlags, ProjectModule};
use shootdesk_db::is_unique_violation;
use shootdesk_db::models::moodboard::CreateMoodboardGroup;
use shootdesk_db::models::project::{CreateProject, UpdateProject};
use shootdesk_db::models::result::CreateResultFolder;
use shootdesk_db::models::user::CreateUser;
use shootdesk_db::repositories::{MoodboardRepo, ProjectRepo, ResultRepo, UserRepo};
use sqlx::PgPool;

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: None,
        shoot_date: None,
        location: None,
        address: None,
    }
}

async fn owner_id(pool: &PgPool) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: "owner@studio.test".to_string(),
            name: "Owner".to_string(),
            password_hash: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_short_code_is_unique_violation(pool: PgPool) {
    let owner = owner_id(&pool).await;
    ProjectRepo::create(&pool, owner, "abcd1234", &new_project("First"))
        .await
        .unwrap();

    let err = ProjectRepo::create(&pool, owner, "abcd1234", &new_project("Second"))
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err, "uq_projects_short_code"));
    assert!(!is_unique_violation(&err, "uq_users_email"));
    assert!(ProjectRepo::short_code_exists(&pool, "abcd1234").await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_inserts_with_same_code_admit_one(pool: PgPool) {
    let owner = owner_id(&pool).await;
    let input = new_project("Race");
    let (a, b) = tokio::join!(
        ProjectRepo::create(&pool, owner, "race0001", &input),
        ProjectRepo::create(&pool, owner, "race0001", &input),
    );
    assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
    let err = a.err().or(b.err()).unwrap();
    assert!(is_unique_violation(&err, "uq_projects_short_code"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_short_code_lookup_is_case_sensitive(pool: PgPool) {
    let owner = owner_id(&pool).await;
    ProjectRepo::create(&pool, owner, "abcd1234", &new_project("Case"))
        .await
        .unwrap();

    assert!(ProjectRepo::find_by_short_code(&pool, "abcd1234").await.unwrap().is_some());
    assert!(ProjectRepo::find_by_short_code(&pool, "ABCD1234").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_project_is_private(pool: PgPool) {
    let owner = owner_id(&pool).await;
    let p = ProjectRepo::create(&pool, owner, "priv0001", &new_project("Private"))
        .await
        .unwrap();
    assert!(!p.is_public);
    assert_eq!(p.public_modules.0, ModuleFlags::none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_merges_public_modules(pool: PgPool) {
    let owner = owner_id(&pool).await;
    let p = ProjectRepo::create(&pool, owner, "flag0001", &new_project("Flags"))
        .await
        .unwrap();

    let first = UpdateProject {
        is_public: Some(true),
        public_modules: Some(BTreeMap::from([
            (ProjectModule::Moodboard, true),
            (ProjectModule::Results, true),
        ])),
        ..Default::default()
    };
    ProjectRepo::update(&pool, p.id, &first).await.unwrap().unwrap();

    let second = UpdateProject {
        public_modules: Some(BTreeMap::from([(ProjectModule::Results, false)])),
        ..Default::default()
    };
    let updated = ProjectRepo::update(&pool, p.id, &second).await.unwrap().unwrap();

    let sharing = updated.sharing();
    assert!(sharing.is_public);
    assert!(sharing.modules.get(ProjectModule::Moodboard));
    assert!(!sharing.modules.get(ProjectModule::Results));
    assert!(!sharing.modules.get(ProjectModule::Selection));
    assert_eq!(updated.name, "Flags");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_cascades_content(pool: PgPool) {
    let owner = owner_id(&pool).await;
    let p = ProjectRepo::create(&pool, owner, "casc0001", &new_project("Cascade"))
        .await
        .unwrap();
    MoodboardRepo::create_group(
        &pool,
        p.id,
        &CreateMoodboardGroup {
            name: "Looks".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();

    assert!(ProjectRepo::delete(&pool, p.id).await.unwrap());
    assert!(!ProjectRepo::exists(&pool, p.id).await.unwrap());
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM moodboard_groups")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_moodboard_groups_append_in_order(pool: PgPool) {
    let owner = owner_id(&pool).await;
    let p = ProjectRepo::create(&pool, owner, "mood0001", &new_project("Mood"))
        .await
        .unwrap();
    for name in ["One", "Two", "Three"] {
        MoodboardRepo::create_group(
            &pool,
            p.id,
            &CreateMoodboardGroup {
                name: name.to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
    }

    let groups = MoodboardRepo::list_groups(&pool, p.id).await.unwrap();
    let orders: Vec<_> = groups.iter().map(|g| g.sort_order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(groups[2].name, "Three");
    assert_eq!(groups[0].status, "PENDING");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_result_folder_paths_nest(pool: PgPool) {
    let owner = owner_id(&pool).await;
    let p = ProjectRepo::create(&pool, owner, "res00001", &new_project("Results"))
        .await
        .unwrap();
    let input = CreateResultFolder {
        name: "Finals".to_string(),
        parent_id: None,
    };
    let root = ResultRepo::create_folder(&pool, p.id, None, &input.name)
        .await
        .unwrap();
    let child = ResultRepo::create_folder(&pool, p.id, Some(&root), "Retouched")
        .await
        .unwrap();
    assert_eq!(root.path, "/Finals");
    assert_eq!(child.path, "/Finals/Retouched");
    assert_eq!(child.parent_id, Some(root.id));

    assert!(ResultRepo::delete_folder(&pool, p.id, root.id).await.unwrap());
    assert!(ResultRepo::list_folders(&pool, p.id).await.unwrap().is_empty());
}
