//! API error envelope
//!
//! [`AppError`] wraps the domain error for the HTTP layer; [`IntoResponse`]
//! maps each error kind onto a status code and a structured body:
//!
//! ```json
//! {
//!   "code": "E1002",
//!   "kind": "OutOfPolicyRange",
//!   "message": "Salary change of 122.22% is outside the policy band [-25%, 50%]",
//!   "details": { "percent": "122.22", "minPercentChange": "-25", "maxPercentChange": "50" }
//! }
//! ```
//!
//! Success bodies are the bare JSON of the resource.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::core::error::DomainError;
use shared::ErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Error body on the wire.
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    kind: ErrorKind,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::NoChange
        | ErrorKind::Conflict
        | ErrorKind::ConcurrentModification
        | ErrorKind::InactiveEntity => StatusCode::CONFLICT,
        ErrorKind::InvalidValue | ErrorKind::InvalidReference | ErrorKind::Validation => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::OutOfPolicyRange | ErrorKind::CyclicManagement => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorKind::PersistenceFailure | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (kind, message, details) = match &self {
            AppError::Domain(err) => {
                let kind = err.kind();
                if kind == ErrorKind::PersistenceFailure {
                    error!(target: "storage", error = %err, "Persistence failure");
                }
                (kind, err.to_string(), err.details())
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    ErrorKind::Internal,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorBody {
            code: kind.code().to_string(),
            kind,
            message,
            details,
        });
        (status_for(kind), body).into_response()
    }
}
