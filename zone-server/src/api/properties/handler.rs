//! Property API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::json;
use shared::models::{Property, PropertyCreate, PropertyLocationUpdate, PropertyZoneAssign};

use crate::audit::{AuditAction, AuditLogRequest};
use crate::core::ServerState;
use crate::db::repository::PropertyRepository;
use crate::utils::validation::{MAX_ADDRESS_LEN, validate_location, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct PropertyListQuery {
    pub zone_id: Option<i64>,
}

/// GET /api/properties - 获取房源列表 (可按区域过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PropertyListQuery>,
) -> AppResult<Json<Vec<Property>>> {
    let repo = PropertyRepository::new(state.db.pool.clone());
    let properties = repo.find_all(query.zone_id).await?;
    Ok(Json(properties))
}

/// GET /api/properties/:id - 获取单个房源
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Property>> {
    let repo = PropertyRepository::new(state.db.pool.clone());
    let property = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::property_not_found(id))?;
    Ok(Json(property))
}

/// POST /api/properties - 登记房源
///
/// 新房源不会自动归入区域；由区域扫描或手动分配完成。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PropertyCreate>,
) -> AppResult<Json<Property>> {
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_location(payload.latitude, payload.longitude)?;

    let repo = PropertyRepository::new(state.db.pool.clone());
    let property = repo.create(payload).await?;

    state
        .audit_service
        .log(
            AuditLogRequest::new(
                AuditAction::PropertyCreated,
                format!("Property '{}' created", property.address),
            )
            .related("property", property.id)
            .with_metadata(json!({ "address": property.address })),
        )
        .await;

    Ok(Json(property))
}

/// PUT /api/properties/:id/location - 保存地理编码结果
pub async fn update_location(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PropertyLocationUpdate>,
) -> AppResult<Json<Property>> {
    validate_location(payload.latitude, payload.longitude)?;

    let repo = PropertyRepository::new(state.db.pool.clone());
    let property = repo
        .update_location(id, payload.latitude, payload.longitude)
        .await?
        .ok_or_else(|| AppError::property_not_found(id))?;

    state
        .audit_service
        .log(
            AuditLogRequest::new(AuditAction::PropertyLocated, format!("Property {id} located"))
                .related("property", id)
                .with_metadata(json!({
                    "latitude": property.latitude,
                    "longitude": property.longitude,
                })),
        )
        .await;

    Ok(Json(property))
}

/// PUT /api/properties/:id/zone - 手动分配区域 (zone_id = null 表示移出)
pub async fn assign_zone(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PropertyZoneAssign>,
) -> AppResult<Json<Property>> {
    state.engine.assign_property_to_zone(id, payload.zone_id).await?;

    let repo = PropertyRepository::new(state.db.pool.clone());
    let property = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::property_not_found(id))?;
    Ok(Json(property))
}
