use std::path::Path;
use std::sync::Arc;

use crate::audit::{AuditService, AuditWorker};
use crate::core::{Config, Result};
use crate::db::DbService;
use crate::db::repository::{PropertyRepository, ZoneRepository};
use crate::zoning::ZoneAssignmentEngine;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求克隆成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | engine | Arc<ZoneAssignmentEngine> | 区域分配引擎 |
/// | audit_service | Arc<AuditService> | 活动日志服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库 (SQLite)
    pub db: DbService,
    /// 区域分配引擎
    pub engine: Arc<ZoneAssignmentEngine>,
    /// 活动日志服务
    pub audit_service: Arc<AuditService>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录
    /// 2. 数据库 (默认 work_dir/zones.db) 与迁移
    /// 3. 活动日志后台 worker 与区域引擎
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let db_path = config.database_path();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let db = DbService::new(&db_path.to_string_lossy()).await?;
        tracing::info!(work_dir = %Path::new(&config.work_dir).display(), "Server state initialized");
        Ok(Self::from_db(config.clone(), db))
    }

    /// 基于已有数据库构造 (测试使用内存库)
    ///
    /// 必须在 tokio 运行时内调用：活动日志 worker 在此启动。
    pub fn from_db(config: Config, db: DbService) -> Self {
        let (audit_service, rx) = AuditService::new(db.pool.clone(), config.audit_buffer_size);
        tokio::spawn(AuditWorker::new(audit_service.storage().clone()).run(rx));

        let engine = ZoneAssignmentEngine::new(
            Arc::new(ZoneRepository::new(db.pool.clone())),
            Arc::new(PropertyRepository::new(db.pool.clone())),
            audit_service.clone(),
        )
        .with_batch_size(config.sweep_batch_size);

        Self {
            config,
            db,
            engine: Arc::new(engine),
            audit_service,
        }
    }
}
