//! Repository for `contracts` and `contract_signatures`.

use shootdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::contract::{
    Contract, ContractSignature, CreateContract, CreateSignature, PublicContract, UpdateContract,
};

const COLUMNS: &str = "id, project_id, title, content, created_at, updated_at";

const SIGNATURE_COLUMNS: &str =
    "id, contract_id, user_id, signature, name, email, ip_address, user_agent, signed_at";

pub struct ContractRepo;

impl ContractRepo {
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Contract>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contracts WHERE project_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_public(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<PublicContract>, sqlx::Error> {
        sqlx::query_as::<_, PublicContract>(
            "SELECT id, title, content FROM contracts
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Find a contract scoped to its project.
    pub async fn find(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contracts WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateContract,
    ) -> Result<Contract, sqlx::Error> {
        let query = format!(
            "INSERT INTO contracts (project_id, title, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(project_id)
            .bind(input.title.trim())
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateContract,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!(
            "UPDATE contracts SET
                title = COALESCE($3, title),
                content = COALESCE($4, content)
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(project_id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.content)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Signatures
    // -----------------------------------------------------------------------

    /// Signatures of every contract in a project, oldest first.
    pub async fn list_signatures(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ContractSignature>, sqlx::Error> {
        sqlx::query_as::<_, ContractSignature>(
            "SELECT s.id, s.contract_id, s.user_id, s.signature, s.name, s.email,
                    s.ip_address, s.user_agent, s.signed_at
             FROM contract_signatures s
             JOIN contracts c ON c.id = s.contract_id
             WHERE c.project_id = $1
             ORDER BY s.signed_at, s.id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    pub async fn create_signature(
        pool: &PgPool,
        input: &CreateSignature,
    ) -> Result<ContractSignature, sqlx::Error> {
        let query = format!(
            "INSERT INTO contract_signatures
                (contract_id, user_id, signature, name, email, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {SIGNATURE_COLUMNS}"
        );
        sqlx::query_as::<_, ContractSignature>(&query)
            .bind(input.contract_id)
            .bind(input.user_id)
            .bind(&input.signature)
            .bind(input.name.trim())
            .bind(input.email.trim())
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }
}
