//! 活动日志后台 Worker
//!
//! 从 mpsc 通道消费 AuditLogRequest，写入 SQLite。
//! 通道关闭时自动退出。

use super::service::AuditLogRequest;
use super::storage::AuditStorage;

pub struct AuditWorker {
    storage: AuditStorage,
}

impl AuditWorker {
    pub fn new(storage: AuditStorage) -> Self {
        Self { storage }
    }

    /// 运行直到所有发送端被释放
    pub async fn run(self, mut rx: tokio::sync::mpsc::Receiver<AuditLogRequest>) {
        tracing::info!("Activity log worker started");

        while let Some(req) = rx.recv().await {
            let action = req.action;
            match self.storage.append(req).await {
                Ok(entry) => {
                    tracing::debug!(
                        audit_id = entry.id,
                        action = %entry.action,
                        related_type = entry.related_type.as_deref().unwrap_or("-"),
                        "Activity entry recorded"
                    );
                }
                Err(e) => {
                    tracing::error!(action = %action, error = %e, "Failed to write activity entry");
                }
            }
        }

        tracing::info!("Activity log channel closed, worker stopping");
    }
}
