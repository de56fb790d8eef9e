//! Reports API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::ServerState;
use crate::reports::{DepartmentSummary, PerformanceQuery, PerformanceRanking};
use crate::utils::AppResult;

pub async fn departments(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<DepartmentSummary>>> {
    Ok(Json(state.reports.department_summaries()?))
}

#[derive(Debug, Default, Deserialize)]
pub struct PerformanceParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Truncate to the N best performers
    pub top: Option<usize>,
}

pub async fn performance(
    State(state): State<ServerState>,
    Query(params): Query<PerformanceParams>,
) -> AppResult<Json<Vec<PerformanceRanking>>> {
    let query = PerformanceQuery {
        start_date: params.start_date,
        end_date: params.end_date,
        top: params.top,
    };
    Ok(Json(state.reports.performance_rankings(&query)?))
}
