//! Activity Log API 模块 (只读查询)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/activity-log", get(handler::list))
}
