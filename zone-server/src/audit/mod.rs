//! 活动日志模块：区域与房产变更的追加式审计追踪
//!
//! # 架构
//!
//! ```text
//! 引擎 / 处理器触发
//!   ├─ AuditService::log()      → mpsc → AuditWorker → SQLite (activity_log)
//!   └─ AuditService::log_sync() → SQLite
//! ```
//!
//! 调用方不等待写入结果：写入失败由 Worker 记录日志，
//! 不会中断产生该条目的区域操作。

pub mod service;
pub mod storage;
pub mod types;
pub mod worker;

pub use service::{AuditLogRequest, AuditService};
pub use storage::{AuditStorage, AuditStorageError};
pub use types::{AuditAction, AuditEntry, AuditListResponse, AuditQuery};
pub use worker::AuditWorker;
