//! Access resolution and the `project_access` grant table.

use shootdesk_core::access::{self, AccessFacts, AccessSource, GrantRole, ProjectRole};
use shootdesk_core::types::DbId;
use sqlx::PgPool;

use super::PARTICIPANT_MATCHES_USER;
use crate::models::project_access::{AccessGrant, AccessGrantWithUser};

const COLUMNS: &str = "id, project_id, user_id, role, created_at, updated_at";

/// Resolves who can do what on a project and manages explicit grants.
pub struct ProjectAccessRepo;

impl ProjectAccessRepo {
    /// Load everything needed to resolve `user_id`'s access to `project_id`
    /// in a single round trip.
    ///
    /// Returns `None` when either the project or the user does not exist.
    pub async fn load_facts(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<Option<AccessFacts>, sqlx::Error> {
        let query = format!(
            "SELECT p.owner_id,
                    (SELECT pa.role FROM project_access pa
                     WHERE pa.project_id = p.id AND pa.user_id = u.id) AS grant_role,
                    EXISTS (SELECT 1 FROM participants pt
                            WHERE pt.project_id = p.id AND {PARTICIPANT_MATCHES_USER})
                        AS participant_match
             FROM projects p
             CROSS JOIN users u
             WHERE p.id = $1 AND u.id = $2"
        );
        let row = sqlx::query_as::<_, (DbId, Option<String>, bool)>(&query)
            .bind(project_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        let Some((owner_id, grant_role, participant_match)) = row else {
            return Ok(None);
        };
        let grant = grant_role
            .as_deref()
            .map(GrantRole::from_name)
            .transpose()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Some(AccessFacts {
            owner_id,
            grant,
            participant_match,
        }))
    }

    /// The strongest path through which `user_id` reaches `project_id`.
    pub async fn resolve(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<Option<AccessSource>, sqlx::Error> {
        let facts = Self::load_facts(pool, user_id, project_id).await?;
        Ok(access::resolve_access(user_id, facts.as_ref()))
    }

    /// Owner, any grant, or a participant match.
    pub async fn can_access_project(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        Ok(access::can_access(Self::resolve(pool, user_id, project_id).await?))
    }

    /// Owner or editor grant.
    pub async fn can_edit_project(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        Ok(access::can_edit(Self::resolve(pool, user_id, project_id).await?))
    }

    pub async fn get_user_role(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<Option<ProjectRole>, sqlx::Error> {
        Ok(access::user_role(Self::resolve(pool, user_id, project_id).await?))
    }

    // -----------------------------------------------------------------------
    // Grants
    // -----------------------------------------------------------------------

    /// Grants on a project with grantee display info, oldest first.
    pub async fn list_grants(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<AccessGrantWithUser>, sqlx::Error> {
        sqlx::query_as::<_, AccessGrantWithUser>(
            "SELECT pa.id, pa.project_id, pa.user_id, pa.role,
                    u.name AS user_name, u.email AS user_email, u.image AS user_image,
                    pa.created_at
             FROM project_access pa
             JOIN users u ON u.id = pa.user_id
             WHERE pa.project_id = $1
             ORDER BY pa.created_at, pa.id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Create a grant, or change the role of an existing one.
    pub async fn upsert_grant(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        role: GrantRole,
    ) -> Result<AccessGrant, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_access (project_id, user_id, role)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_project_access_project_user
             DO UPDATE SET role = EXCLUDED.role
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccessGrant>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(role.as_str())
            .fetch_one(pool)
            .await
    }

    /// Remove a user's grant. Returns `true` if a row was removed.
    pub async fn revoke(pool: &PgPool, project_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM project_access WHERE project_id = $1 AND user_id = $2")
                .bind(project_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
