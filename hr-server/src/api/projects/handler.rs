//! Project API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Project, ProjectCreate, ProjectUpdate};
use crate::utils::AppResult;

pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Project>>> {
    Ok(Json(state.personnel.list_projects()?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Project>> {
    Ok(Json(state.personnel.get_project(&id)?))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProjectCreate>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let project = state.personnel.create_project(&payload)?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProjectUpdate>,
) -> AppResult<Json<Project>> {
    Ok(Json(state.personnel.update_project(&id, &payload)?))
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
    state.personnel.delete_project(&id, &body.acting_user)?;
    Ok(Json(true))
}
