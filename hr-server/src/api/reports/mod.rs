//! Reports API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/reports/departments", get(handler::departments))
        .route("/api/reports/performance", get(handler::performance))
}
