//! Zone API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::models::{LatLng, Property, Zone, ZoneCreate, ZoneUpdate};

use crate::core::ServerState;
use crate::db::repository::{PropertyRepository, ZoneRepository};
use crate::utils::{AppError, AppResult};
use crate::zoning::{PropertyLocator, SweepReport, ZoneStore};

/// GET /api/zones - 获取所有区域
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Zone>>> {
    let repo = ZoneRepository::new(state.db.pool.clone());
    let zones = repo.find_all().await?;
    Ok(Json(zones))
}

/// GET /api/zones/:id - 获取单个区域
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Zone>> {
    let repo = ZoneRepository::new(state.db.pool.clone());
    let zone = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::zone_not_found(id))?;
    Ok(Json(zone))
}

/// POST /api/zones - 创建区域并分配区域内的房源
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ZoneCreate>,
) -> AppResult<Json<Zone>> {
    let zone = state.engine.create_zone(payload).await?;
    Ok(Json(zone))
}

/// PUT /api/zones/:id - 更新区域
///
/// 多边形变化时重新扫描成员
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ZoneUpdate>,
) -> AppResult<Json<Zone>> {
    let polygon_changed = payload.changes_polygon();
    let zone = state.engine.update_zone(id, payload).await?;

    if polygon_changed {
        state.engine.sweep_zone(id).await?;
    }

    Ok(Json(zone))
}

/// DELETE /api/zones/:id - 删除区域 (释放所属房源)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let result = state.engine.delete_zone(id).await?;
    Ok(Json(result))
}

/// POST /api/zones/:id/sweep - 重新计算区域成员
pub async fn sweep(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<SweepReport>> {
    let report = state.engine.sweep_zone(id).await?;
    Ok(Json(report))
}

/// GET /api/zones/:id/properties - 获取区域内的所有房源
pub async fn list_properties(
    State(state): State<ServerState>,
    Path(zone_id): Path<i64>,
) -> AppResult<Json<Vec<Property>>> {
    let zones = ZoneRepository::new(state.db.pool.clone());
    if zones.find_by_id(zone_id).await?.is_none() {
        return Err(AppError::zone_not_found(zone_id));
    }

    let repo = PropertyRepository::new(state.db.pool.clone());
    let properties = repo.find_by_zone(zone_id).await?;
    Ok(Json(properties))
}

#[derive(Debug, Deserialize)]
pub struct LocateQuery {
    pub lat: f64,
    pub lng: f64,
}

/// GET /api/zones/locate?lat=&lng= - 查找包含该点的区域
pub async fn locate(
    State(state): State<ServerState>,
    Query(query): Query<LocateQuery>,
) -> AppResult<Json<Vec<Zone>>> {
    if !query.lat.is_finite() || !query.lng.is_finite() {
        return Err(AppError::validation("lat and lng must be finite numbers"));
    }
    let zones = state
        .engine
        .zones_containing(LatLng::new(query.lat, query.lng))
        .await?;
    Ok(Json(zones))
}
