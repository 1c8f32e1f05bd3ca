//! Property API 模块

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/properties", get(handler::list).post(handler::create))
        .route("/api/properties/{id}", get(handler::get_by_id))
        .route("/api/properties/{id}/location", put(handler::update_location))
        .route("/api/properties/{id}/zone", put(handler::assign_zone))
}
