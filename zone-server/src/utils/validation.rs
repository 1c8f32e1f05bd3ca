//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: zone names
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: color codes
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Each coordinate, when present, must be a finite WGS84 value.
///
/// A property missing either coordinate is stored but never swept into a zone.
pub fn validate_location(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), AppError> {
    if let Some(lat) = latitude
        && !(lat.is_finite() && (-90.0..=90.0).contains(&lat))
    {
        return Err(AppError::with_message(
            shared::error::ErrorCode::PropertyInvalidLocation,
            format!("latitude {lat} is out of range"),
        ));
    }
    if let Some(lng) = longitude
        && !(lng.is_finite() && (-180.0..=180.0).contains(&lng))
    {
        return Err(AppError::with_message(
            shared::error::ErrorCode::PropertyInvalidLocation,
            format!("longitude {lng} is out of range"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Centro", "name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let err = validate_required_text(&long, "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("too long"));
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "description", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some(String::new()), "description", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("#".repeat(101)), "color", MAX_SHORT_TEXT_LEN).is_err());
    }

    #[test]
    fn test_location() {
        assert!(validate_location(None, None).is_ok());
        assert!(validate_location(Some(39.47), Some(-0.37)).is_ok());

        assert!(validate_location(None, Some(-0.40)).is_ok());

        let err = validate_location(Some(91.0), Some(0.0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::PropertyInvalidLocation);
        assert!(validate_location(None, Some(-180.5)).is_err());
        assert!(validate_location(Some(0.0), Some(f64::NAN)).is_err());
    }
}
