//! Employee API Module
//!
//! CRUD plus the two salary endpoints. `POST /{id}/salary` is the only
//! route in the whole API that changes a salary.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/salary", post(handler::change_salary))
        .route("/{id}/salary-history", get(handler::salary_history))
}
