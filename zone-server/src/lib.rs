//! Zone Server - 房产后台区域分配服务
//!
//! # 架构概述
//!
//! - **区域** (`zoning`): 几何内核、存储端口与区域分配引擎
//! - **数据库** (`db`): SQLite 连接池、迁移与仓储实现
//! - **活动日志** (`audit`): mpsc 异步写入的追加式日志
//! - **HTTP API** (`api`): RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! zone-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── zoning/        # 几何、端口、引擎
//! ├── db/            # 连接池与仓储
//! ├── audit/         # 活动日志
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod audit;
pub mod core;
pub mod db;
pub mod utils;
pub mod zoning;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use utils::logger::init_logger;
pub use utils::{AppError, AppResult, ErrorCode, ErrorResponse};
pub use zoning::{EngineError, SweepReport, ZoneAssignmentEngine};

/// 设置运行环境: 加载 .env、读取配置并初始化日志
pub fn setup_environment() -> crate::core::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    init_logger(&config.log_level, config.is_production(), config.log_dir.as_deref())?;
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
 _____
|__  /___  _ __   ___  ___
  / // _ \| '_ \ / _ \/ __|
 / /| (_) | | | |  __/\__ \
/____\___/|_| |_|\___||___/
    "#
    );
}
