//! Unified error codes
//!
//! This module defines all error codes used across zone-server and the frontend.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Zone errors
//! - 2xxx: Property errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,

    // ==================== 1xxx: Zone ====================
    /// Zone not found
    ZoneNotFound = 1001,
    /// Polygon is empty, degenerate or has non-finite vertices
    InvalidPolygon = 1002,
    /// Property sweep for a zone failed
    ZoneSweepFailed = 1003,

    // ==================== 2xxx: Property ====================
    /// Property not found
    PropertyNotFound = 2001,
    /// Property coordinates are invalid
    PropertyInvalidLocation = 2002,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",

            // Zone
            ErrorCode::ZoneNotFound => "Zone not found",
            ErrorCode::InvalidPolygon => "Invalid zone polygon",
            ErrorCode::ZoneSweepFailed => "Could not assign properties",

            // Property
            ErrorCode::PropertyNotFound => "Property not found",
            ErrorCode::PropertyInvalidLocation => "Invalid property location",

            // System
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),

            // Zone
            1001 => Ok(ErrorCode::ZoneNotFound),
            1002 => Ok(ErrorCode::InvalidPolygon),
            1003 => Ok(ErrorCode::ZoneSweepFailed),

            // Property
            2001 => Ok(ErrorCode::PropertyNotFound),
            2002 => Ok(ErrorCode::PropertyInvalidLocation),

            // System
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
