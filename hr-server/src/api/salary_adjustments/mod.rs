//! Batch Salary Adjustment API Module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/salary-adjustments", post(handler::apply_batch))
}
