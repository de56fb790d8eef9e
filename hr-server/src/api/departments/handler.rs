//! Department API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Department, DepartmentCreate, DepartmentUpdate};
use crate::utils::AppResult;

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Department>>> {
    Ok(Json(state.personnel.list_departments()?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Department>> {
    Ok(Json(state.personnel.get_department(&id)?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DepartmentCreate>,
) -> AppResult<(StatusCode, Json<Department>)> {
    let department = state.personnel.create_department(&payload)?;
    Ok((StatusCode::CREATED, Json(department)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DepartmentUpdate>,
) -> AppResult<Json<Department>> {
    Ok(Json(state.personnel.update_department(&id, &payload)?))
}

#[derive(Debug, Deserialize)]
pub struct DeleteBody {
    pub acting_user: String,
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<DeleteBody>,
) -> AppResult<Json<bool>> {
    state.personnel.delete_department(&id, &body.acting_user)?;
    Ok(Json(true))
}
