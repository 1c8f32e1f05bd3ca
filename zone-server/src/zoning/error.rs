//! Engine errors

use thiserror::Error;

use super::geometry::GeometryError;
use crate::db::repository::RepoError;
use crate::utils::AppError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),

    #[error("Zone {0} not found")]
    ZoneNotFound(i64),

    #[error("Property {0} not found")]
    PropertyNotFound(i64),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The zone was created but its initial sweep failed. The zone has been
    /// removed again unless that removal failed as well.
    #[error("Could not assign properties to zone {zone_id}: {source}")]
    SweepFailed {
        zone_id: i64,
        #[source]
        source: RepoError,
    },

    #[error(transparent)]
    Persistence(#[from] RepoError),
}

impl From<GeometryError> for EngineError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::InvalidPolygon(msg) => EngineError::InvalidPolygon(msg),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidPolygon(msg) => AppError::invalid_polygon(msg),
            EngineError::ZoneNotFound(id) => AppError::zone_not_found(id),
            EngineError::PropertyNotFound(id) => AppError::property_not_found(id),
            EngineError::Validation(msg) => AppError::validation(msg),
            EngineError::SweepFailed { zone_id, source } => {
                tracing::error!(zone_id, error = %source, "Initial zone sweep failed");
                AppError::new(shared::error::ErrorCode::ZoneSweepFailed).with_detail("zone_id", zone_id)
            }
            EngineError::Persistence(e) => {
                tracing::error!(error = %e, "Zone persistence failed");
                AppError::database("Could not save the zone")
            }
        }
    }
}
