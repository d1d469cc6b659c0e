//! Repository for the `participants` table.

use shootdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::participant::{
    CreateParticipant, Participant, PublicParticipant, UpdateParticipant,
};

const COLUMNS: &str =
    "id, project_id, user_id, name, email, phone, role, notes, created_at, updated_at";

/// Registered user whose email matches `$n` (case-insensitive), or NULL.
fn linked_user(param: u8) -> String {
    format!("(SELECT id FROM users WHERE email = LOWER(NULLIF(TRIM(${param}), '')))")
}

pub struct ParticipantRepo;

impl ParticipantRepo {
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Participant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM participants WHERE project_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Name and role only.
    pub async fn list_public(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<PublicParticipant>, sqlx::Error> {
        sqlx::query_as::<_, PublicParticipant>(
            "SELECT name, role FROM participants WHERE project_id = $1 ORDER BY created_at, id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Find a participant scoped to its project.
    pub async fn find(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM participants WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a participant, linking it to the registered user with the same
    /// email if there is one.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateParticipant,
    ) -> Result<Participant, sqlx::Error> {
        let query = format!(
            "INSERT INTO participants (project_id, user_id, name, email, phone, role, notes)
             VALUES ($1, {}, $3, NULLIF(TRIM($2), ''), $4, $5, $6)
             RETURNING {COLUMNS}",
            linked_user(2)
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(project_id)
            .bind(&input.email)
            .bind(input.name.trim())
            .bind(&input.phone)
            .bind(&input.role)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Update a participant. Only non-`None` fields are applied. A changed
    /// email re-links the participant.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateParticipant,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!(
            "UPDATE participants SET
                name = COALESCE($3, name),
                email = CASE WHEN $4::text IS NULL THEN email ELSE NULLIF(TRIM($4), '') END,
                user_id = CASE WHEN $4::text IS NULL THEN user_id ELSE {} END,
                phone = COALESCE($5, phone),
                role = COALESCE($6, role),
                notes = COALESCE($7, notes)
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}",
            linked_user(4)
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .bind(project_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.role)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM participants WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Copy a user's profile onto every participant row linked to them.
    /// Returns the number of rows updated.
    pub async fn sync_profile(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
        phone: Option<&str>,
        profession: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE participants SET name = $2, phone = $3, role = $4 WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(name)
        .bind(phone)
        .bind(profession)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
