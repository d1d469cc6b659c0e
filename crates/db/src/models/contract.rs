//! Contracts and their signatures.

use serde::{Deserialize, Serialize};
use shootdesk_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contract {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A signature row. `signature` is the base64-encoded drawing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContractSignature {
    pub id: DbId,
    pub contract_id: DbId,
    pub user_id: DbId,
    pub signature: String,
    pub name: String,
    pub email: String,
    pub ip_address: String,
    pub user_agent: String,
    pub signed_at: Timestamp,
}

/// Contract text as shown on the public page, without signatures.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicContract {
    pub id: DbId,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContract {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContract {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Request body for signing a contract.
#[derive(Debug, Clone, Deserialize)]
pub struct SignContract {
    pub signature: String,
    pub name: String,
    pub email: String,
}

/// Everything stored for a signature, including request metadata.
#[derive(Debug, Clone)]
pub struct CreateSignature {
    pub contract_id: DbId,
    pub user_id: DbId,
    pub signature: String,
    pub name: String,
    pub email: String,
    pub ip_address: String,
    pub user_agent: String,
}
