//! Handlers for project contracts and their signatures.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;
use shootdesk_core::error::CoreError;
use shootdesk_core::types::DbId;
use shootdesk_core::validation::{
    require_email, require_text, MAX_CONTRACT_CONTENT_LEN, MAX_CONTRACT_TITLE_LEN, MAX_NAME_LEN,
};
use shootdesk_db::models::contract::{
    Contract, ContractSignature, CreateContract, CreateSignature, SignContract, UpdateContract,
};
use shootdesk_db::repositories::ContractRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::project_access::{require_edit, require_view};
use crate::response::DataResponse;
use crate::state::AppState;

const UNKNOWN: &str = "unknown";

#[derive(Debug, Serialize)]
pub struct ContractWithSignatures {
    #[serde(flatten)]
    pub contract: Contract,
    pub signatures: Vec<ContractSignature>,
}

fn contract_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Contract",
        id,
    })
}

/// Client address from the reverse proxy headers.
fn client_ip(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    forwarded.or(real_ip).unwrap_or(UNKNOWN).to_string()
}

fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// GET /api/v1/projects/{id}/contracts
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ContractWithSignatures>>>> {
    require_view(&state.pool, auth.user_id, project_id).await?;

    let contracts = ContractRepo::list_by_project(&state.pool, project_id).await?;
    let mut signatures: HashMap<DbId, Vec<ContractSignature>> = HashMap::new();
    for signature in ContractRepo::list_signatures(&state.pool, project_id).await? {
        signatures
            .entry(signature.contract_id)
            .or_default()
            .push(signature);
    }

    let data = contracts
        .into_iter()
        .map(|contract| ContractWithSignatures {
            signatures: signatures.remove(&contract.id).unwrap_or_default(),
            contract,
        })
        .collect();
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/projects/{id}/contracts
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateContract>,
) -> AppResult<(StatusCode, Json<DataResponse<Contract>>)> {
    require_edit(&state.pool, auth.user_id, project_id).await?;
    require_text("Title", &input.title, MAX_CONTRACT_TITLE_LEN)?;
    require_text("Content", &input.content, MAX_CONTRACT_CONTENT_LEN)?;

    let contract = ContractRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: contract })))
}

/// GET /api/v1/projects/{id}/contracts/{cid}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<ContractWithSignatures>>> {
    require_view(&state.pool, auth.user_id, project_id).await?;

    let contract = ContractRepo::find(&state.pool, project_id, id)
        .await?
        .ok_or_else(|| contract_not_found(id))?;
    let signatures = ContractRepo::list_signatures(&state.pool, project_id)
        .await?
        .into_iter()
        .filter(|s| s.contract_id == id)
        .collect();

    Ok(Json(DataResponse {
        data: ContractWithSignatures {
            contract,
            signatures,
        },
    }))
}

/// PUT /api/v1/projects/{id}/contracts/{cid}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateContract>,
) -> AppResult<Json<DataResponse<Contract>>> {
    require_edit(&state.pool, auth.user_id, project_id).await?;
    if let Some(title) = &input.title {
        require_text("Title", title, MAX_CONTRACT_TITLE_LEN)?;
    }
    if let Some(content) = &input.content {
        require_text("Content", content, MAX_CONTRACT_CONTENT_LEN)?;
    }

    let contract = ContractRepo::update(&state.pool, project_id, id, &input)
        .await?
        .ok_or_else(|| contract_not_found(id))?;
    Ok(Json(DataResponse { data: contract }))
}

/// DELETE /api/v1/projects/{id}/contracts/{cid}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    require_edit(&state.pool, auth.user_id, project_id).await?;
    if ContractRepo::delete(&state.pool, project_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(contract_not_found(id))
    }
}

/// POST /api/v1/projects/{id}/contracts/{cid}/sign
///
/// Records the signature together with the caller's address and user agent.
pub async fn sign(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((project_id, id)): Path<(DbId, DbId)>,
    headers: HeaderMap,
    Json(input): Json<SignContract>,
) -> AppResult<(StatusCode, Json<DataResponse<ContractSignature>>)> {
    require_view(&state.pool, auth.user_id, project_id).await?;
    ContractRepo::find(&state.pool, project_id, id)
        .await?
        .ok_or_else(|| contract_not_found(id))?;

    if input.signature.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Signature is required".into(),
        )));
    }
    require_text("Name", &input.name, MAX_NAME_LEN)?;
    require_email("Email", input.email.trim())?;

    let signature = ContractRepo::create_signature(
        &state.pool,
        &CreateSignature {
            contract_id: id,
            user_id: auth.user_id,
            signature: input.signature,
            name: input.name,
            email: input.email,
            ip_address: client_ip(&headers),
            user_agent: user_agent(&headers),
        },
    )
    .await?;

    tracing::info!(project_id, contract_id = id, user_id = auth.user_id, "Contract signed");
    Ok((StatusCode::CREATED, Json(DataResponse { data: signature })))
}
