//! Zone Model

use serde::{Deserialize, Serialize};

/// Default map color for zones created without one
pub const DEFAULT_ZONE_COLOR: &str = "#3388ff";

/// Geographic point / polygon vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Zone entity (user-drawn polygon grouping properties)
///
/// `coordinates` is the ordered vertex ring. The closing vertex is implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub coordinates: Vec<LatLng>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create zone payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCreate {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub coordinates: Vec<LatLng>,
}

/// Update zone payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub coordinates: Option<Vec<LatLng>>,
}

impl ZoneUpdate {
    /// Whether applying this update changes the polygon
    pub fn changes_polygon(&self) -> bool {
        self.coordinates.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_create_deserialize() {
        let json = r#"{
            "name": "Centro",
            "coordinates": [{"lat": 39.40, "lng": -0.41}, {"lat": 39.40, "lng": -0.39}, {"lat": 39.42, "lng": -0.39}]
        }"#;
        let create: ZoneCreate = serde_json::from_str(json).unwrap();
        assert_eq!(create.name, "Centro");
        assert!(create.description.is_none());
        assert!(create.color.is_none());
        assert_eq!(create.coordinates.len(), 3);
        assert_eq!(create.coordinates[1], LatLng::new(39.40, -0.39));
    }

    #[test]
    fn test_zone_update_changes_polygon() {
        let update = ZoneUpdate {
            name: Some("Norte".to_string()),
            ..Default::default()
        };
        assert!(!update.changes_polygon());

        let update = ZoneUpdate {
            coordinates: Some(vec![(0.0, 0.0).into(), (0.0, 1.0).into(), (1.0, 1.0).into()]),
            ..Default::default()
        };
        assert!(update.changes_polygon());
    }
}
