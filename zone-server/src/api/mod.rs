//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`zones`] - 区域管理接口
//! - [`properties`] - 房源接口
//! - [`activity_log`] - 活动日志查询

pub mod activity_log;
pub mod health;
pub mod properties;
pub mod zones;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Assemble every route with shared middleware
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(zones::router())
        .merge(properties::router())
        .merge(activity_log::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
