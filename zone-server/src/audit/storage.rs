//! 活动日志 SQLite 存储层
//!
//! Append-only 设计，没有任何删除/更新接口。

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use thiserror::Error;

use super::service::AuditLogRequest;
use super::types::{AuditAction, AuditEntry, AuditQuery};

/// 存储错误
#[derive(Debug, Error)]
pub enum AuditStorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Corrupt entry {id}: {reason}")]
    Corrupt { id: i64, reason: String },
}

impl From<sqlx::Error> for AuditStorageError {
    fn from(err: sqlx::Error) -> Self {
        AuditStorageError::Database(err.to_string())
    }
}

pub type AuditStorageResult<T> = Result<T, AuditStorageError>;

impl From<AuditStorageError> for shared::error::AppError {
    fn from(err: AuditStorageError) -> Self {
        shared::error::AppError::database(err.to_string())
    }
}

/// 数据库行（action 与 metadata 以文本存储）
#[derive(Debug, sqlx::FromRow)]
struct AuditRecord {
    id: i64,
    timestamp: i64,
    action: String,
    description: String,
    related_id: Option<String>,
    related_type: Option<String>,
    metadata: String,
}

impl TryFrom<AuditRecord> for AuditEntry {
    type Error = AuditStorageError;

    fn try_from(r: AuditRecord) -> Result<Self, Self::Error> {
        let action: AuditAction = r
            .action
            .parse()
            .map_err(|reason| AuditStorageError::Corrupt { id: r.id, reason })?;
        Ok(AuditEntry {
            id: r.id,
            timestamp: r.timestamp,
            action,
            description: r.description,
            related_id: r.related_id,
            related_type: r.related_type,
            metadata: serde_json::from_str(&r.metadata)?,
        })
    }
}

/// 活动日志存储 (SQLite)
#[derive(Clone)]
pub struct AuditStorage {
    pool: SqlitePool,
}

impl AuditStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 追加一条记录
    pub async fn append(&self, req: AuditLogRequest) -> AuditStorageResult<AuditEntry> {
        let timestamp = shared::util::now_millis();
        let metadata = serde_json::to_string(&req.metadata)?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO activity_log (timestamp, action, description, related_id, related_type, metadata) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(timestamp)
        .bind(req.action.as_str())
        .bind(&req.description)
        .bind(&req.related_id)
        .bind(&req.related_type)
        .bind(&metadata)
        .fetch_one(&self.pool)
        .await?;

        Ok(AuditEntry {
            id,
            timestamp,
            action: req.action,
            description: req.description,
            related_id: req.related_id,
            related_type: req.related_type,
            metadata: req.metadata,
        })
    }

    /// 按时间倒序、过滤并分页，返回 `(items, total)`
    pub async fn query(&self, q: &AuditQuery) -> AuditStorageResult<(Vec<AuditEntry>, u64)> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM activity_log");
        push_filters(&mut count, q);
        let total: i64 = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Sqlite>::new(
            "SELECT id, timestamp, action, description, related_id, related_type, metadata FROM activity_log",
        );
        push_filters(&mut select, q);
        select
            .push(" ORDER BY id DESC LIMIT ")
            .push_bind(q.limit as i64)
            .push(" OFFSET ")
            .push_bind(q.offset as i64);

        let records: Vec<AuditRecord> = select.build_query_as::<AuditRecord>().fetch_all(&self.pool).await?;
        let items = records
            .into_iter()
            .map(AuditEntry::try_from)
            .collect::<AuditStorageResult<Vec<_>>>()?;

        Ok((items, total as u64))
    }
}

fn push_filters<'a>(qb: &mut QueryBuilder<'a, Sqlite>, q: &AuditQuery) {
    let mut sep = " WHERE ";
    if let Some(action) = q.action {
        qb.push(sep).push("action = ").push_bind(action.as_str());
        sep = " AND ";
    }
    if let Some(related_type) = &q.related_type {
        qb.push(sep).push("related_type = ").push_bind(related_type.clone());
        sep = " AND ";
    }
    if let Some(related_id) = &q.related_id {
        qb.push(sep).push("related_id = ").push_bind(related_id.clone());
    }
}
