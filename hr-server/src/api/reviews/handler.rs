//! Performance Review API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{PerformanceReview, ReviewCreate};
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub employee_id: Option<String>,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<PerformanceReview>>> {
    Ok(Json(
        state.personnel.list_reviews(query.employee_id.as_deref())?,
    ))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PerformanceReview>> {
    Ok(Json(state.personnel.get_review(&id)?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<(StatusCode, Json<PerformanceReview>)> {
    let review = state.personnel.create_review(&payload)?;
    Ok((StatusCode::CREATED, Json(review)))
}
