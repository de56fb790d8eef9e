//! Audit Log API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::audit::{AuditEntry, AuditQuery, ChainVerification};
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::Paginated;

/// Filtered, paginated audit log, newest first
pub async fn query(
    State(state): State<ServerState>,
    Query(query): Query<AuditQuery>,
) -> AppResult<Json<Paginated<AuditEntry>>> {
    let page = state
        .audit
        .query(&query)
        .map_err(crate::core::DomainError::from)?;
    Ok(Json(page))
}

#[derive(Debug, Default, Deserialize)]
pub struct VerifyQuery {
    /// Start timestamp (Unix millis, inclusive)
    pub start_date: Option<i64>,
    /// End timestamp (Unix millis, inclusive)
    pub end_date: Option<i64>,
}

/// Walk the hash chain and report any breaks
pub async fn verify(
    State(state): State<ServerState>,
    Query(query): Query<VerifyQuery>,
) -> AppResult<Json<ChainVerification>> {
    let verification = state
        .audit
        .verify_chain(query.start_date, query.end_date)
        .map_err(crate::core::DomainError::from)?;
    Ok(Json(verification))
}
