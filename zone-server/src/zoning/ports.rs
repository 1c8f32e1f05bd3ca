//! Persistence ports injected into the engine
//!
//! The engine only talks to storage through these traits. SQLite
//! implementations live in `crate::db::repository`; tests plug in
//! in-memory fakes.

use async_trait::async_trait;
use shared::models::{Property, Zone, ZoneCreate, ZoneUpdate};

use super::geometry::BoundingBox;
use crate::audit::AuditLogRequest;
use crate::db::repository::RepoResult;

/// Zone Repository
#[async_trait]
pub trait ZoneStore: Send + Sync {
    async fn find_all(&self) -> RepoResult<Vec<Zone>>;

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Zone>>;

    /// Insert a zone. `data.color = None` stores the default color.
    async fn create(&self, data: ZoneCreate) -> RepoResult<Zone>;

    /// Apply the present fields; `None` when the zone does not exist
    async fn update(&self, id: i64, data: ZoneUpdate) -> RepoResult<Option<Zone>>;

    /// Release every property pointing at the zone, then remove it, as one
    /// unit. `None` when the zone does not exist, otherwise the number of
    /// properties released.
    async fn delete(&self, id: i64) -> RepoResult<Option<u64>>;
}

/// Property Locator
#[async_trait]
pub trait PropertyLocator: Send + Sync {
    /// Geocoded properties inside `bbox` (inclusive). No ordering guarantee.
    async fn find_candidates(&self, bbox: &BoundingBox) -> RepoResult<Vec<Property>>;

    /// Properties currently assigned to `zone_id`
    async fn find_by_zone(&self, zone_id: i64) -> RepoResult<Vec<Property>>;

    /// Set `zone_id` on every listed property as one logical operation.
    /// Returns the number of rows changed.
    async fn batch_set_zone(&self, property_ids: &[i64], zone_id: Option<i64>) -> RepoResult<u64>;

    /// `false` when the property does not exist
    async fn set_zone(&self, property_id: i64, zone_id: Option<i64>) -> RepoResult<bool>;
}

/// Activity Log sink
///
/// Fire-and-forget: implementations swallow and log their own failures.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn record(&self, entry: AuditLogRequest);
}
