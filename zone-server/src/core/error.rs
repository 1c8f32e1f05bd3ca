use thiserror::Error;

use crate::utils::AppError;

/// 启动与运行期错误 (HTTP 层之外)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Startup failed: {0}")]
    Startup(#[from] AppError),
}

/// 服务器 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
