//! Zoning domain
//!
//! - [`geometry`]: pure polygon math
//! - [`ports`]: storage traits the engine depends on
//! - [`engine`]: zone lifecycle and property membership

pub mod engine;
pub mod error;
pub mod geometry;
pub mod ports;

pub use engine::{DEFAULT_SWEEP_BATCH_SIZE, SweepReport, ZoneAssignmentEngine};
pub use error::{EngineError, EngineResult};
pub use geometry::{BoundingBox, GeometryError, bounding_box, point_in_polygon, validate_polygon};
pub use ports::{ActivityLog, PropertyLocator, ZoneStore};
