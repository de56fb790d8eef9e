//! Domain error type
//!
//! Every rejected mutation maps to one [`DomainError`] variant carrying the
//! offending values, so the API layer can return a structured reason without
//! re-deriving anything. Converted to an HTTP response by `utils::error`.

use rust_decimal::Decimal;
use serde_json::{Value, json};
use thiserror::Error;

use crate::db::StoreError;
use shared::ErrorKind;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} {id} is inactive")]
    Inactive { entity: &'static str, id: String },

    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("{field} does not reference an existing active employee: {id}")]
    InvalidReference { field: &'static str, id: String },

    #[error("Salary is already {salary}; change would be a no-op")]
    NoChange { salary: Decimal },

    #[error("Salary change of {percent}% is outside the policy band [{min}%, {max}%]")]
    OutOfPolicyRange {
        percent: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("Manager chain for employee {employee_id} would form a cycle")]
    CyclicManagement { employee_id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),

    #[error("Persistence failure: {0}")]
    Persistence(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Inactive { .. } => ErrorKind::InactiveEntity,
            DomainError::InvalidValue { .. } => ErrorKind::InvalidValue,
            DomainError::InvalidReference { .. } => ErrorKind::InvalidReference,
            DomainError::NoChange { .. } => ErrorKind::NoChange,
            DomainError::OutOfPolicyRange { .. } => ErrorKind::OutOfPolicyRange,
            DomainError::CyclicManagement { .. } => ErrorKind::CyclicManagement,
            DomainError::Validation(_) => ErrorKind::Validation,
            DomainError::Conflict(_) => ErrorKind::Conflict,
            DomainError::ConcurrentModification(_) => ErrorKind::ConcurrentModification,
            DomainError::Persistence(_) => ErrorKind::PersistenceFailure,
        }
    }

    /// Offending values for the client (e.g. the computed percentage).
    pub fn details(&self) -> Option<Value> {
        match self {
            DomainError::NotFound { entity, id } | DomainError::Inactive { entity, id } => {
                Some(json!({ "entity": entity, "id": id }))
            }
            DomainError::InvalidValue { field, value } => {
                Some(json!({ "field": field, "value": value }))
            }
            DomainError::InvalidReference { field, id } => {
                Some(json!({ "field": field, "id": id }))
            }
            DomainError::NoChange { salary } => Some(json!({ "salary": salary })),
            DomainError::OutOfPolicyRange { percent, min, max } => Some(json!({
                "percent": percent,
                "minPercentChange": min,
                "maxPercentChange": max,
            })),
            DomainError::CyclicManagement { employee_id } => {
                Some(json!({ "employeeId": employee_id }))
            }
            _ => None,
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match &err {
            // A conflicting writer surfaces as a transaction error on begin/commit
            StoreError::Transaction(_) => DomainError::ConcurrentModification(err.to_string()),
            _ => DomainError::Persistence(err.to_string()),
        }
    }
}
