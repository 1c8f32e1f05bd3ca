//! 活动日志服务
//!
//! `AuditService` 是活动日志的写入入口，提供：
//! - `log()`：写入有界 mpsc 通道，由 [`AuditWorker`](super::AuditWorker) 消费
//! - `log_sync()`：直接写入（测试、启动场景）
//! - `query()`：直接读取存储

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::mpsc;

use super::storage::{AuditStorage, AuditStorageError};
use super::types::*;
use crate::zoning::ActivityLog;

/// 发送给 Worker 的日志请求
#[derive(Debug, Clone)]
pub struct AuditLogRequest {
    pub action: AuditAction,
    pub description: String,
    pub related_id: Option<String>,
    pub related_type: Option<String>,
    pub metadata: serde_json::Value,
}

impl AuditLogRequest {
    pub fn new(action: AuditAction, description: impl Into<String>) -> Self {
        Self {
            action,
            description: description.into(),
            related_id: None,
            related_type: None,
            metadata: serde_json::Value::Object(Default::default()),
        }
    }

    /// 关联条目所涉及的资源
    pub fn related(mut self, related_type: impl Into<String>, related_id: impl ToString) -> Self {
        self.related_type = Some(related_type.into());
        self.related_id = Some(related_id.to_string());
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// 活动日志服务
///
/// 通过 mpsc 通道接收日志请求，异步写入 SQLite。查询直接读取存储。
pub struct AuditService {
    storage: AuditStorage,
    tx: mpsc::Sender<AuditLogRequest>,
}

impl std::fmt::Debug for AuditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditService")
            .field("capacity", &self.tx.capacity())
            .finish_non_exhaustive()
    }
}

impl AuditService {
    /// 创建服务及 Worker 使用的接收端
    pub fn new(pool: SqlitePool, buffer_size: usize) -> (Arc<Self>, mpsc::Receiver<AuditLogRequest>) {
        let (tx, rx) = mpsc::channel(buffer_size.max(1));
        let storage = AuditStorage::new(pool);
        (Arc::new(Self { storage, tx }), rx)
    }

    /// 将条目排入后台 Worker 队列
    ///
    /// 通道满时等待。通道已关闭时记录日志并丢弃条目，调用方不会收到错误。
    pub async fn log(&self, req: AuditLogRequest) {
        if let Err(e) = self.tx.send(req).await {
            tracing::error!(
                action = %e.0.action,
                "Activity log channel closed, entry lost"
            );
        }
    }

    /// 绕过 Worker 直接写入
    pub async fn log_sync(&self, req: AuditLogRequest) -> Result<AuditEntry, AuditStorageError> {
        self.storage.append(req).await
    }

    /// 查询活动日志
    pub async fn query(&self, q: &AuditQuery) -> Result<(Vec<AuditEntry>, u64), AuditStorageError> {
        self.storage.query(q).await
    }

    pub fn storage(&self) -> &AuditStorage {
        &self.storage
    }
}

#[async_trait]
impl ActivityLog for AuditService {
    async fn record(&self, entry: AuditLogRequest) {
        self.log(entry).await;
    }
}
