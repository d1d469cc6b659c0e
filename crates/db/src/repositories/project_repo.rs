//! Repository for the `projects` table.

use shootdesk_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use super::PARTICIPANT_MATCHES_USER;
use crate::models::project::{
    CreateProject, Project, ProjectCounts, ProjectListItem, UpdateProject,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, description, shoot_date, location, address, \
                       short_code, is_archived, is_public, public_modules, created_at, updated_at";

/// [`COLUMNS`] qualified with the `p` alias, for joins.
const P_COLUMNS: &str = "p.id, p.owner_id, p.name, p.description, p.shoot_date, p.location, \
                         p.address, p.short_code, p.is_archived, p.is_public, p.public_modules, \
                         p.created_at, p.updated_at";

/// Restricts `p` to projects user `$1` reaches through any access path.
fn accessible_filter() -> String {
    format!(
        "(p.owner_id = $1
          OR EXISTS (SELECT 1 FROM project_access pa
                     WHERE pa.project_id = p.id AND pa.user_id = $1)
          OR EXISTS (SELECT 1 FROM participants pt JOIN users u ON u.id = $1
                     WHERE pt.project_id = p.id AND {PARTICIPANT_MATCHES_USER}))"
    )
}

/// Case-insensitive name/location search on `$2`; a NULL search matches all.
const SEARCH_FILTER: &str = "($2::text IS NULL
      OR p.name ILIKE '%' || $2 || '%'
      OR p.location ILIKE '%' || $2 || '%')";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `owner_id` with the given short code.
    ///
    /// A taken short code fails with a unique violation on
    /// `uq_projects_short_code`; the caller regenerates and retries.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        short_code: &str,
        input: &CreateProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (owner_id, short_code, name, description, shoot_date, location, address)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(short_code)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(input.shoot_date)
            .bind(&input.location)
            .bind(&input.address)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by its public short code (exact, case-sensitive).
    pub async fn find_by_short_code(
        pool: &PgPool,
        short_code: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE short_code = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(short_code)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Best-effort pre-check before insert. The unique constraint decides.
    pub async fn short_code_exists(pool: &PgPool, short_code: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM projects WHERE short_code = $1)",
        )
        .bind(short_code)
        .fetch_one(pool)
        .await
    }

    /// Projects the user can access by any path, newest first.
    pub async fn list_accessible(
        pool: &PgPool,
        user_id: DbId,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProjectListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {P_COLUMNS}, o.name AS owner_name
             FROM projects p
             JOIN users o ON o.id = p.owner_id
             WHERE {} AND {SEARCH_FILTER}
             ORDER BY p.created_at DESC, p.id DESC
             LIMIT $3 OFFSET $4",
            accessible_filter()
        );
        sqlx::query_as::<_, ProjectListItem>(&query)
            .bind(user_id)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total for [`Self::list_accessible`] with the same filters.
    pub async fn count_accessible(
        pool: &PgPool,
        user_id: DbId,
        search: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM projects p WHERE {} AND {SEARCH_FILTER}",
            accessible_filter()
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(user_id)
            .bind(search)
            .fetch_one(pool)
            .await
    }

    pub async fn counts(pool: &PgPool, id: DbId) -> Result<ProjectCounts, sqlx::Error> {
        sqlx::query_as::<_, ProjectCounts>(
            "SELECT
                (SELECT COUNT(*) FROM moodboard_groups WHERE project_id = $1) AS moodboard_groups,
                (SELECT COUNT(*) FROM participants WHERE project_id = $1) AS participants,
                (SELECT COUNT(*) FROM contracts WHERE project_id = $1) AS contracts,
                (SELECT COUNT(*) FROM selection_images WHERE project_id = $1) AS selection_images",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied;
    /// `public_modules` is merged key by key.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                shoot_date = COALESCE($4, shoot_date),
                location = COALESCE($5, location),
                address = COALESCE($6, address),
                is_archived = COALESCE($7, is_archived),
                is_public = COALESCE($8, is_public),
                public_modules = public_modules || COALESCE($9, '{{}}'::jsonb)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(input.shoot_date)
            .bind(&input.location)
            .bind(&input.address)
            .bind(input.is_archived)
            .bind(input.is_public)
            .bind(input.public_modules.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project and, via cascades, all of its content.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
