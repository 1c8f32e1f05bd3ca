//! Error handling
//!
//! The HTTP-facing error type lives in `shared::error` so clients decode the
//! same codes. This module re-exports it and bridges server-side errors.

pub use shared::error::{AppError, AppResult, ErrorCode, ErrorResponse};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        tracing::error!(target: "database", error = %err, "Repository error");
        AppError::database(err.to_string())
    }
}
