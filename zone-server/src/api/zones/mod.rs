//! Zone API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/zones", get(handler::list).post(handler::create))
        .route("/api/zones/locate", get(handler::locate))
        .route(
            "/api/zones/{id}",
            get(handler::get_by_id).put(handler::update).delete(handler::delete),
        )
        .route("/api/zones/{id}/sweep", post(handler::sweep))
        .route("/api/zones/{id}/properties", get(handler::list_properties))
}
