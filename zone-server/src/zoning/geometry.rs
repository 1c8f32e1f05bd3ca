//! Geometry kernel for zone polygons
//!
//! Pure functions over `LatLng` rings: ray-casting containment, bounding
//! boxes and polygon validation. Latitude is treated as the y axis and
//! longitude as the x axis.

use serde::Serialize;
use shared::models::LatLng;
use thiserror::Error;

/// Minimum vertex count of a non-degenerate polygon
pub const MIN_POLYGON_VERTICES: usize = 3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),
}

/// Axis-aligned rectangle enclosing a polygon
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Inclusive on all four sides
    pub fn contains(&self, point: LatLng) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lng >= self.min_lng
            && point.lng <= self.max_lng
    }
}

/// Even-odd ray casting test.
///
/// A ray is cast from `point` towards +infinity along the longitude axis and
/// every polygon edge it crosses toggles the result. The ring is cyclic, so
/// the closing vertex need not be repeated. Points exactly on an edge may
/// land on either side.
pub fn point_in_polygon(point: LatLng, polygon: &[LatLng]) -> bool {
    let mut inside = false;
    let Some(mut j) = polygon.len().checked_sub(1) else {
        return false;
    };

    for (i, vi) in polygon.iter().enumerate() {
        let vj = polygon[j];
        if (vi.lat > point.lat) != (vj.lat > point.lat) {
            let crossing_lng = (vj.lng - vi.lng) * (point.lat - vi.lat) / (vj.lat - vi.lat) + vi.lng;
            if point.lng < crossing_lng {
                inside = !inside;
            }
        }
        j = i;
    }

    inside
}

/// Running min/max over every vertex.
pub fn bounding_box(coordinates: &[LatLng]) -> Result<BoundingBox, GeometryError> {
    let (first, rest) = coordinates
        .split_first()
        .ok_or_else(|| GeometryError::InvalidPolygon("polygon has no vertices".to_string()))?;

    let init = BoundingBox {
        min_lat: first.lat,
        max_lat: first.lat,
        min_lng: first.lng,
        max_lng: first.lng,
    };

    Ok(rest.iter().fold(init, |bbox, p| BoundingBox {
        min_lat: bbox.min_lat.min(p.lat),
        max_lat: bbox.max_lat.max(p.lat),
        min_lng: bbox.min_lng.min(p.lng),
        max_lng: bbox.max_lng.max(p.lng),
    }))
}

/// Reject rings that cannot describe an area.
pub fn validate_polygon(coordinates: &[LatLng]) -> Result<(), GeometryError> {
    if coordinates.len() < MIN_POLYGON_VERTICES {
        return Err(GeometryError::InvalidPolygon(format!(
            "polygon needs at least {} vertices, got {}",
            MIN_POLYGON_VERTICES,
            coordinates.len()
        )));
    }

    if let Some((idx, _)) = coordinates
        .iter()
        .enumerate()
        .find(|(_, p)| !p.lat.is_finite() || !p.lng.is_finite())
    {
        return Err(GeometryError::InvalidPolygon(format!(
            "vertex {} has a non-finite coordinate",
            idx
        )));
    }

    Ok(())
}
