//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::ZoneNotFound | Self::PropertyNotFound => StatusCode::NOT_FOUND,

            // 422 Unprocessable Entity (well-formed request, unusable geometry)
            Self::InvalidPolygon | Self::PropertyInvalidLocation => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 500 Internal Server Error
            Self::DatabaseError | Self::ConfigError | Self::ZoneSweepFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request
            Self::ValidationFailed => StatusCode::BAD_REQUEST,
        }
    }
}
