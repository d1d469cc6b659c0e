//! Repository for `selection_images` and `image_ratings`.

use shootdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::selection::{
    CreateSelectionImage, ImageRating, SelectionFilter, SelectionImage, SelectionImageWithRating,
};

const COLUMNS: &str =
    "id, project_id, filename, path, thumbnail, width, height, file_size, imported_at";

pub struct SelectionRepo;

impl SelectionRepo {
    /// Images of a project with `user_id`'s rating, newest first.
    ///
    /// A filter value restricts the list to images the user rated with that
    /// value.
    pub async fn list_with_rating(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        filter: &SelectionFilter,
    ) -> Result<Vec<SelectionImageWithRating>, sqlx::Error> {
        sqlx::query_as::<_, SelectionImageWithRating>(
            "SELECT i.id, i.project_id, i.filename, i.path, i.thumbnail, i.width, i.height,
                    i.file_size, i.imported_at, r.stars, r.color
             FROM selection_images i
             LEFT JOIN image_ratings r ON r.image_id = i.id AND r.user_id = $2
             WHERE i.project_id = $1
               AND ($3::smallint IS NULL OR r.stars = $3)
               AND ($4::text IS NULL OR r.color = $4)
             ORDER BY i.imported_at DESC, i.id DESC",
        )
        .bind(project_id)
        .bind(user_id)
        .bind(filter.stars)
        .bind(&filter.color)
        .fetch_all(pool)
        .await
    }

    /// Images of a project without ratings, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<SelectionImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM selection_images
             WHERE project_id = $1
             ORDER BY imported_at DESC, id DESC"
        );
        sqlx::query_as::<_, SelectionImage>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Find an image scoped to its project.
    pub async fn find_image(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<SelectionImage>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM selection_images WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, SelectionImage>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create_image(
        pool: &PgPool,
        input: &CreateSelectionImage,
    ) -> Result<SelectionImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO selection_images (project_id, filename, path, thumbnail, width, height, file_size)
             VALUES ($1, $2, $3, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SelectionImage>(&query)
            .bind(input.project_id)
            .bind(&input.filename)
            .bind(&input.path)
            .bind(input.width)
            .bind(input.height)
            .bind(input.file_size)
            .fetch_one(pool)
            .await
    }

    /// Create or replace `user_id`'s rating of an image.
    pub async fn upsert_rating(
        pool: &PgPool,
        image_id: DbId,
        user_id: DbId,
        stars: Option<i16>,
        color: Option<&str>,
    ) -> Result<ImageRating, sqlx::Error> {
        sqlx::query_as::<_, ImageRating>(
            "INSERT INTO image_ratings (image_id, user_id, stars, color)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_image_ratings_image_user
             DO UPDATE SET stars = EXCLUDED.stars, color = EXCLUDED.color
             RETURNING id, image_id, user_id, stars, color, updated_at",
        )
        .bind(image_id)
        .bind(user_id)
        .bind(stars)
        .bind(color)
        .fetch_one(pool)
        .await
    }
}
