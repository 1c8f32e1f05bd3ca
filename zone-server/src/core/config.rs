use std::path::PathBuf;
use std::str::FromStr;

use crate::utils::AppError;
use crate::zoning::DEFAULT_SWEEP_BATCH_SIZE;

const DEFAULT_HTTP_PORT: u16 = 3000;
const DEFAULT_AUDIT_BUFFER_SIZE: usize = 1024;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | {WORK_DIR}/zones.db | SQLite 数据库文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 日志文件目录 |
/// | SWEEP_BATCH_SIZE | 50 | 每批射线检测的候选数 |
/// | AUDIT_BUFFER_SIZE | 1024 | 活动日志通道容量 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/zones HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 数据库文件路径 (未设置时位于工作目录下)
    pub database_path: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
    /// 日志文件目录 (未设置时仅输出到控制台)
    pub log_dir: Option<String>,
    /// 区域扫描批大小
    pub sweep_batch_size: usize,
    /// 活动日志 mpsc 通道容量
    pub audit_buffer_size: usize,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置的变量使用默认值；数值变量无法解析时返回 `ConfigError`
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: parse_var("HTTP_PORT", std::env::var("HTTP_PORT").ok(), DEFAULT_HTTP_PORT)?,
            database_path: std::env::var("DATABASE_PATH").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            sweep_batch_size: parse_var(
                "SWEEP_BATCH_SIZE",
                std::env::var("SWEEP_BATCH_SIZE").ok(),
                DEFAULT_SWEEP_BATCH_SIZE,
            )?,
            audit_buffer_size: parse_var(
                "AUDIT_BUFFER_SIZE",
                std::env::var("AUDIT_BUFFER_SIZE").ok(),
                DEFAULT_AUDIT_BUFFER_SIZE,
            )?,
        })
    }

    /// 默认配置，仅覆盖工作目录和端口，不读取环境变量
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        Self {
            work_dir: work_dir.into(),
            http_port,
            database_path: None,
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            sweep_batch_size: DEFAULT_SWEEP_BATCH_SIZE,
            audit_buffer_size: DEFAULT_AUDIT_BUFFER_SIZE,
        }
    }

    /// 数据库文件路径
    pub fn database_path(&self) -> PathBuf {
        match &self.database_path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(&self.work_dir).join("zones.db"),
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// 解析数值型环境变量，未设置时返回默认值
fn parse_var<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, AppError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| AppError::config(key, &value)),
        None => Ok(default),
    }
}
