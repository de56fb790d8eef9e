//! Health API Handlers

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::core::ServerState;

pub async fn health(State(state): State<ServerState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "environment": state.config.environment,
    }))
}
