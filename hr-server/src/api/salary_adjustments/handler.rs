//! Batch Salary Adjustment Handlers
//!
//! Always responds 200 with one outcome per item; per-item errors live in
//! the outcome list, not in the HTTP status.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::core::ServerState;
use crate::salary::{BatchItemOutcome, SalaryChange};
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct BatchAdjustments {
    pub items: Vec<SalaryChange>,
}

pub async fn apply_batch(
    State(state): State<ServerState>,
    Json(payload): Json<BatchAdjustments>,
) -> AppResult<Json<Vec<BatchItemOutcome>>> {
    Ok(Json(state.salary.change_salaries(&payload.items)))
}
