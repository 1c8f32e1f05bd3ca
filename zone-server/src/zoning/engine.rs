//! Zone Assignment Engine
//!
//! Orchestrates zone lifecycle and property membership:
//!
//! ```text
//! create_zone ─► validate ─► ZoneStore::create ─► sweep ─┬─► batch_set_zone (once)
//!                                                        └─► on failure: ZoneStore::delete
//! sweep_zone  ─► find_members ─► release outsiders ─► assign newcomers
//! ```
//!
//! A sweep narrows candidates with the polygon's bounding box in storage,
//! then runs ray casting in fixed-size batches.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use shared::models::{LatLng, Zone, ZoneCreate, ZoneUpdate};

use super::error::{EngineError, EngineResult};
use super::geometry::{BoundingBox, bounding_box, point_in_polygon, validate_polygon};
use super::ports::{ActivityLog, PropertyLocator, ZoneStore};
use crate::audit::{AuditAction, AuditLogRequest};
use crate::db::repository::RepoResult;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};

/// Candidates examined per ray-casting batch
pub const DEFAULT_SWEEP_BATCH_SIZE: usize = 50;

/// Outcome of recomputing one zone's membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub zone_id: i64,
    /// Geocoded properties inside the bounding box
    pub candidates: usize,
    /// Properties inside the polygon after the sweep
    pub members: usize,
    /// Properties newly pointed at this zone
    pub assigned: u64,
    /// Former members that fell outside and were cleared
    pub released: u64,
}

/// Properties matching a polygon
struct Membership {
    candidates: usize,
    matched: Vec<i64>,
}

pub struct ZoneAssignmentEngine {
    zones: Arc<dyn ZoneStore>,
    properties: Arc<dyn PropertyLocator>,
    activity: Arc<dyn ActivityLog>,
    batch_size: usize,
}

impl std::fmt::Debug for ZoneAssignmentEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneAssignmentEngine")
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}

impl ZoneAssignmentEngine {
    pub fn new(
        zones: Arc<dyn ZoneStore>,
        properties: Arc<dyn PropertyLocator>,
        activity: Arc<dyn ActivityLog>,
    ) -> Self {
        Self {
            zones,
            properties,
            activity,
            batch_size: DEFAULT_SWEEP_BATCH_SIZE,
        }
    }

    /// Zero is treated as one
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Create a zone and assign every geocoded property inside it.
    ///
    /// If the assignment step fails the new zone is deleted again and
    /// [`EngineError::SweepFailed`] is returned. When that delete fails too,
    /// the zone stays in storage with no members.
    pub async fn create_zone(&self, input: ZoneCreate) -> EngineResult<Zone> {
        validate_zone_text(Some(&input.name), &input.description, &input.color)?;
        validate_polygon(&input.coordinates)?;
        let bbox = bounding_box(&input.coordinates)?;

        let zone = self.zones.create(input).await?;
        tracing::info!(zone_id = zone.id, name = %zone.name, vertices = zone.coordinates.len(), "Zone created");
        self.activity
            .record(
                AuditLogRequest::new(AuditAction::ZoneCreated, format!("Zone '{}' created", zone.name))
                    .related("zone", zone.id)
                    .with_metadata(json!({ "name": zone.name, "vertices": zone.coordinates.len() })),
            )
            .await;

        match self.assign_new_zone(&zone, &bbox).await {
            Ok(assigned) => {
                tracing::info!(zone_id = zone.id, assigned, "Initial sweep finished");
                Ok(zone)
            }
            Err(source) => {
                self.compensate_create(&zone).await;
                Err(EngineError::SweepFailed {
                    zone_id: zone.id,
                    source,
                })
            }
        }
    }

    /// Apply field changes. Membership is not recomputed; call
    /// [`sweep_zone`](Self::sweep_zone) after a polygon change.
    pub async fn update_zone(&self, id: i64, update: ZoneUpdate) -> EngineResult<Zone> {
        validate_zone_text(update.name.as_deref(), &update.description, &update.color)?;
        if let Some(coordinates) = &update.coordinates {
            validate_polygon(coordinates)?;
        }

        let polygon_changed = update.changes_polygon();
        let zone = self
            .zones
            .update(id, update)
            .await?
            .ok_or(EngineError::ZoneNotFound(id))?;

        tracing::info!(zone_id = id, polygon_changed, "Zone updated");
        self.activity
            .record(
                AuditLogRequest::new(AuditAction::ZoneUpdated, format!("Zone '{}' updated", zone.name))
                    .related("zone", id)
                    .with_metadata(json!({ "polygon_changed": polygon_changed })),
            )
            .await;
        Ok(zone)
    }

    /// Release dependent properties and remove the zone.
    ///
    /// Returns `false` when the zone does not exist.
    pub async fn delete_zone(&self, id: i64) -> EngineResult<bool> {
        let Some(zone) = self.zones.find_by_id(id).await? else {
            return Ok(false);
        };
        let Some(released) = self.zones.delete(id).await? else {
            return Ok(false);
        };

        tracing::info!(zone_id = id, released, "Zone deleted");
        self.activity
            .record(
                AuditLogRequest::new(AuditAction::ZoneDeleted, format!("Zone '{}' deleted", zone.name))
                    .related("zone", id)
                    .with_metadata(json!({ "released": released })),
            )
            .await;
        Ok(true)
    }

    /// Manual override; `None` clears the assignment. Idempotent.
    pub async fn assign_property_to_zone(&self, property_id: i64, zone_id: Option<i64>) -> EngineResult<()> {
        if let Some(zone_id) = zone_id
            && self.zones.find_by_id(zone_id).await?.is_none()
        {
            return Err(EngineError::ZoneNotFound(zone_id));
        }

        if !self.properties.set_zone(property_id, zone_id).await? {
            return Err(EngineError::PropertyNotFound(property_id));
        }

        let description = match zone_id {
            Some(zone_id) => format!("Property {property_id} assigned to zone {zone_id}"),
            None => format!("Property {property_id} removed from its zone"),
        };
        self.activity
            .record(
                AuditLogRequest::new(AuditAction::PropertyZoneAssigned, description)
                    .related("property", property_id)
                    .with_metadata(json!({ "zone_id": zone_id })),
            )
            .await;
        Ok(())
    }

    /// Recompute membership against the zone's current polygon.
    ///
    /// Matching properties are taken over from whatever zone held them;
    /// members now outside the polygon, or without coordinates, are released.
    pub async fn sweep_zone(&self, id: i64) -> EngineResult<SweepReport> {
        let zone = self
            .zones
            .find_by_id(id)
            .await?
            .ok_or(EngineError::ZoneNotFound(id))?;
        let bbox = bounding_box(&zone.coordinates)?;

        let membership = self.find_members(&zone.coordinates, &bbox).await?;
        let matched: HashSet<i64> = membership.matched.iter().copied().collect();
        let current: HashSet<i64> = self
            .properties
            .find_by_zone(id)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();

        let outsiders: Vec<i64> = current.difference(&matched).copied().collect();
        let newcomers: Vec<i64> = membership
            .matched
            .iter()
            .copied()
            .filter(|pid| !current.contains(pid))
            .collect();

        let released = self.properties.batch_set_zone(&outsiders, None).await?;
        let assigned = self.properties.batch_set_zone(&newcomers, Some(id)).await?;

        let report = SweepReport {
            zone_id: id,
            candidates: membership.candidates,
            members: matched.len(),
            assigned,
            released,
        };
        tracing::info!(
            zone_id = id,
            candidates = report.candidates,
            members = report.members,
            assigned,
            released,
            "Zone re-swept"
        );
        self.activity
            .record(
                AuditLogRequest::new(AuditAction::ZoneResweep, format!("Zone '{}' re-swept", zone.name))
                    .related("zone", id)
                    .with_metadata(json!({
                        "candidates": report.candidates,
                        "members": report.members,
                        "assigned": assigned,
                        "released": released,
                    })),
            )
            .await;
        Ok(report)
    }

    /// Every zone whose polygon contains `point`
    pub async fn zones_containing(&self, point: LatLng) -> EngineResult<Vec<Zone>> {
        let zones = self.zones.find_all().await?;
        Ok(zones
            .into_iter()
            .filter(|zone| {
                bounding_box(&zone.coordinates).is_ok_and(|bbox| bbox.contains(point))
                    && point_in_polygon(point, &zone.coordinates)
            })
            .collect())
    }

    async fn assign_new_zone(&self, zone: &Zone, bbox: &BoundingBox) -> RepoResult<u64> {
        let membership = self.find_members(&zone.coordinates, bbox).await?;
        if membership.matched.is_empty() {
            tracing::debug!(zone_id = zone.id, candidates = membership.candidates, "No properties inside new zone");
            return Ok(0);
        }

        let assigned = self
            .properties
            .batch_set_zone(&membership.matched, Some(zone.id))
            .await?;
        self.activity
            .record(
                AuditLogRequest::new(
                    AuditAction::ZonePropertiesAssigned,
                    format!("{assigned} properties assigned to zone '{}'", zone.name),
                )
                .related("zone", zone.id)
                .with_metadata(json!({ "candidates": membership.candidates, "assigned": assigned })),
            )
            .await;
        Ok(assigned)
    }

    async fn compensate_create(&self, zone: &Zone) {
        match self.zones.delete(zone.id).await {
            Ok(_) => {
                tracing::warn!(zone_id = zone.id, "Initial sweep failed, zone removed");
                self.activity
                    .record(
                        AuditLogRequest::new(
                            AuditAction::ZoneDeleted,
                            format!("Zone '{}' removed after failed assignment", zone.name),
                        )
                        .related("zone", zone.id)
                        .with_metadata(json!({ "reason": "sweep_failed" })),
                    )
                    .await;
            }
            Err(e) => {
                tracing::error!(zone_id = zone.id, error = %e, "Could not remove zone after failed sweep; zone kept without assignments");
            }
        }
    }

    async fn find_members(&self, polygon: &[LatLng], bbox: &BoundingBox) -> RepoResult<Membership> {
        let candidates = self.properties.find_candidates(bbox).await?;

        let mut matched = Vec::new();
        for batch in candidates.chunks(self.batch_size) {
            matched.extend(batch.iter().filter_map(|property| {
                let location = property.location()?;
                point_in_polygon(location, polygon).then_some(property.id)
            }));
        }

        Ok(Membership {
            candidates: candidates.len(),
            matched,
        })
    }
}

fn validate_zone_text(
    name: Option<&str>,
    description: &Option<String>,
    color: &Option<String>,
) -> EngineResult<()> {
    let check = || {
        if let Some(name) = name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        validate_optional_text(description, "description", MAX_NOTE_LEN)?;
        if let Some(color) = color {
            validate_required_text(color, "color", MAX_SHORT_TEXT_LEN)?;
        }
        Ok::<_, crate::utils::AppError>(())
    };
    check().map_err(|e| EngineError::Validation(e.message))
}
