//! Repository for `result_folders` and `result_images`.

use shootdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::result::{
    child_folder_path, CreateResultImage, ResultFolder, ResultImage,
};

const FOLDER_COLUMNS: &str = "id, project_id, parent_id, name, path, created_at";

const IMAGE_COLUMNS: &str = "id, folder_id, filename, path, thumbnail, width, height, created_at";

pub struct ResultRepo;

impl ResultRepo {
    /// Folders of a project ordered by path, so parents precede children.
    pub async fn list_folders(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ResultFolder>, sqlx::Error> {
        let query = format!(
            "SELECT {FOLDER_COLUMNS} FROM result_folders WHERE project_id = $1 ORDER BY path, id"
        );
        sqlx::query_as::<_, ResultFolder>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Find a folder scoped to its project.
    pub async fn find_folder(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<ResultFolder>, sqlx::Error> {
        let query = format!(
            "SELECT {FOLDER_COLUMNS} FROM result_folders WHERE id = $1 AND project_id = $2"
        );
        sqlx::query_as::<_, ResultFolder>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Create a folder under `parent` (or at the root). The caller checks
    /// that `parent` belongs to `project_id`.
    pub async fn create_folder(
        pool: &PgPool,
        project_id: DbId,
        parent: Option<&ResultFolder>,
        name: &str,
    ) -> Result<ResultFolder, sqlx::Error> {
        let path = child_folder_path(parent.map(|p| p.path.as_str()), name);
        let query = format!(
            "INSERT INTO result_folders (project_id, parent_id, name, path)
             VALUES ($1, $2, $3, $4)
             RETURNING {FOLDER_COLUMNS}"
        );
        sqlx::query_as::<_, ResultFolder>(&query)
            .bind(project_id)
            .bind(parent.map(|p| p.id))
            .bind(name.trim())
            .bind(path)
            .fetch_one(pool)
            .await
    }

    /// Delete a folder; subfolders and images go with it.
    pub async fn delete_folder(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM result_folders WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Images in every folder of a project.
    pub async fn list_images(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ResultImage>, sqlx::Error> {
        sqlx::query_as::<_, ResultImage>(
            "SELECT i.id, i.folder_id, i.filename, i.path, i.thumbnail, i.width, i.height,
                    i.created_at
             FROM result_images i
             JOIN result_folders f ON f.id = i.folder_id
             WHERE f.project_id = $1
             ORDER BY i.folder_id, i.created_at, i.id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    pub async fn create_image(
        pool: &PgPool,
        input: &CreateResultImage,
    ) -> Result<ResultImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO result_images (folder_id, filename, path, thumbnail, width, height)
             VALUES ($1, $2, $3, $3, $4, $5)
             RETURNING {IMAGE_COLUMNS}"
        );
        sqlx::query_as::<_, ResultImage>(&query)
            .bind(input.folder_id)
            .bind(&input.filename)
            .bind(&input.path)
            .bind(input.width)
            .bind(input.height)
            .fetch_one(pool)
            .await
    }
}
