//! HTTP error type and its JSON rendering.
//!
//! Every failed request answers with `{ "error": <message>, "code": <CODE> }`.
//! The private-project answer additionally carries `sign_in_required` so the
//! client can decide between a sign-in prompt and an access-denied page.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use shootdesk_core::error::CoreError;

/// Message returned in place of any internal detail.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Lookup by something other than an id (email, short code) found nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    /// A short link to a project the visitor may not see.
    #[error("This project is private")]
    PrivateProject { sign_in_required: bool },
}

pub type AppResult<T> = Result<T, AppError>;

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sign_in_required: Option<bool>,
}

/// Status, machine-readable code and client-facing message.
struct Rendered {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl Rendered {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 500 with the detail logged and withheld from the client.
    fn internal(detail: &dyn std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Request failed with an internal error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            INTERNAL_MESSAGE,
        )
    }
}

impl AppError {
    fn render(&self) -> Rendered {
        match self {
            AppError::Core(core) => render_core(core),
            AppError::Database(err) => render_sqlx(err),
            AppError::NotFound(msg) => Rendered::new(StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::BadRequest(msg) => {
                Rendered::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
            AppError::InternalError(msg) => Rendered::internal(msg),
            AppError::PrivateProject { .. } => {
                Rendered::new(StatusCode::FORBIDDEN, "PRIVATE_PROJECT", self.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let rendered = self.render();
        let sign_in_required = match self {
            AppError::PrivateProject { sign_in_required } => Some(sign_in_required),
            _ => None,
        };
        let body = ErrorBody {
            error: rendered.message,
            code: rendered.code,
            sign_in_required,
        };
        (rendered.status, Json(body)).into_response()
    }
}

fn render_core(err: &CoreError) -> Rendered {
    match err {
        CoreError::NotFound { entity, id } => Rendered::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => {
            Rendered::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
        }
        CoreError::Conflict(msg) => Rendered::new(StatusCode::CONFLICT, "CONFLICT", msg),
        CoreError::Unauthorized(msg) => {
            Rendered::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg)
        }
        CoreError::Forbidden(msg) => Rendered::new(StatusCode::FORBIDDEN, "FORBIDDEN", msg),
        CoreError::Internal(msg) => Rendered::internal(msg),
    }
}

/// Map a sqlx failure onto an HTTP answer.
///
/// `RowNotFound` is 404, a unique violation on a `uq_*` constraint is 409,
/// a foreign-key violation is 400. Anything else is a 500.
fn render_sqlx(err: &sqlx::Error) -> Rendered {
    let db_err = match err {
        sqlx::Error::RowNotFound => {
            return Rendered::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found");
        }
        sqlx::Error::Database(db_err) => db_err,
        other => return Rendered::internal(other),
    };

    match (db_err.code().as_deref(), db_err.constraint()) {
        (Some("23505"), Some(constraint)) if constraint.starts_with("uq_") => Rendered::new(
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Duplicate value violates unique constraint: {constraint}"),
        ),
        (Some("23503"), _) => Rendered::new(
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            "Referenced record does not exist",
        ),
        _ => Rendered::internal(db_err),
    }
}
