//! Repository for moodboard groups, images and comments.

use shootdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::moodboard::{
    CreateMoodboardGroup, CreateMoodboardImage, MoodboardComment, MoodboardGroup,
    MoodboardImage, UpdateMoodboardGroup,
};

const GROUP_COLUMNS: &str =
    "id, project_id, name, description, status, sort_order, created_at, updated_at";

const IMAGE_COLUMNS: &str =
    "id, group_id, filename, path, thumbnail, width, height, sort_order, created_at";

pub struct MoodboardRepo;

impl MoodboardRepo {
    // -----------------------------------------------------------------------
    // Groups
    // -----------------------------------------------------------------------

    /// Groups of a project in display order.
    pub async fn list_groups(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<MoodboardGroup>, sqlx::Error> {
        let query = format!(
            "SELECT {GROUP_COLUMNS} FROM moodboard_groups
             WHERE project_id = $1
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, MoodboardGroup>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_group(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<MoodboardGroup>, sqlx::Error> {
        let query = format!(
            "SELECT {GROUP_COLUMNS} FROM moodboard_groups WHERE id = $1 AND project_id = $2"
        );
        sqlx::query_as::<_, MoodboardGroup>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Append a group after the current last one.
    pub async fn create_group(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateMoodboardGroup,
    ) -> Result<MoodboardGroup, sqlx::Error> {
        let query = format!(
            "INSERT INTO moodboard_groups (project_id, name, description, sort_order)
             VALUES ($1, $2, $3,
                     (SELECT COALESCE(MAX(sort_order) + 1, 0)
                      FROM moodboard_groups WHERE project_id = $1))
             RETURNING {GROUP_COLUMNS}"
        );
        sqlx::query_as::<_, MoodboardGroup>(&query)
            .bind(project_id)
            .bind(input.name.trim())
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn update_group(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateMoodboardGroup,
    ) -> Result<Option<MoodboardGroup>, sqlx::Error> {
        let query = format!(
            "UPDATE moodboard_groups SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                sort_order = COALESCE($6, sort_order)
             WHERE id = $1 AND project_id = $2
             RETURNING {GROUP_COLUMNS}"
        );
        sqlx::query_as::<_, MoodboardGroup>(&query)
            .bind(id)
            .bind(project_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(&input.status)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete_group(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM moodboard_groups WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Images
    // -----------------------------------------------------------------------

    /// All images of all groups in a project, in display order.
    pub async fn list_images(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<MoodboardImage>, sqlx::Error> {
        sqlx::query_as::<_, MoodboardImage>(
            "SELECT i.id, i.group_id, i.filename, i.path, i.thumbnail, i.width, i.height,
                    i.sort_order, i.created_at
             FROM moodboard_images i
             JOIN moodboard_groups g ON g.id = i.group_id
             WHERE g.project_id = $1
             ORDER BY i.group_id, i.sort_order, i.id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Insert an image at the end of its group.
    pub async fn create_image(
        pool: &PgPool,
        input: &CreateMoodboardImage,
    ) -> Result<MoodboardImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO moodboard_images (group_id, filename, path, thumbnail, width, height, sort_order)
             VALUES ($1, $2, $3, $3, $4, $5,
                     (SELECT COUNT(*)::int FROM moodboard_images WHERE group_id = $1))
             RETURNING {IMAGE_COLUMNS}"
        );
        sqlx::query_as::<_, MoodboardImage>(&query)
            .bind(input.group_id)
            .bind(&input.filename)
            .bind(&input.path)
            .bind(input.width)
            .bind(input.height)
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Comments
    // -----------------------------------------------------------------------

    /// All comments in a project with author names, oldest first.
    pub async fn list_comments(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<MoodboardComment>, sqlx::Error> {
        sqlx::query_as::<_, MoodboardComment>(
            "SELECT c.id, c.group_id, c.user_id, u.name AS user_name, c.content, c.created_at
             FROM moodboard_comments c
             JOIN moodboard_groups g ON g.id = c.group_id
             JOIN users u ON u.id = c.user_id
             WHERE g.project_id = $1
             ORDER BY c.created_at, c.id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    pub async fn create_comment(
        pool: &PgPool,
        group_id: DbId,
        user_id: DbId,
        content: &str,
    ) -> Result<MoodboardComment, sqlx::Error> {
        sqlx::query_as::<_, MoodboardComment>(
            "WITH inserted AS (
                INSERT INTO moodboard_comments (group_id, user_id, content)
                VALUES ($1, $2, $3)
                RETURNING id, group_id, user_id, content, created_at
             )
             SELECT i.id, i.group_id, i.user_id, u.name AS user_name, i.content, i.created_at
             FROM inserted i
             JOIN users u ON u.id = i.user_id",
        )
        .bind(group_id)
        .bind(user_id)
        .bind(content.trim())
        .fetch_one(pool)
        .await
    }
}
