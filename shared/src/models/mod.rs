//! Data models
//!
//! Shared between zone-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod property;
pub mod zone;

// Re-exports
pub use property::*;
pub use zone::*;
