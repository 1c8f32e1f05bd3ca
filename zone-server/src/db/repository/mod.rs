//! Repository Module
//!
//! SQLite implementations of the zoning persistence ports plus the plain
//! CRUD the HTTP layer needs.

pub mod property;
pub mod zone;

// Re-exports
pub use property::PropertyRepository;
pub use zone::ZoneRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Serialization(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Upper bound on ids bound into a single `IN (...)` statement
pub const MAX_IDS_PER_STATEMENT: usize = 50;
