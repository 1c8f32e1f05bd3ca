//! Property Model

use serde::{Deserialize, Serialize};

use super::LatLng;

/// Property listing (subset used for zoning)
///
/// Only geocoded properties (both coordinates set) take part in zone sweeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Property {
    pub id: i64,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub zone_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Property {
    /// Geocoded position, if both coordinates are known
    pub fn location(&self) -> Option<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(LatLng { lat, lng }),
            _ => None,
        }
    }
}

/// Create property payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyCreate {
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Geocoding result for an existing property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyLocationUpdate {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Manual zone assignment (`zone_id = null` clears it)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyZoneAssign {
    pub zone_id: Option<i64>,
}
