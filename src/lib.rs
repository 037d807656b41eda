// Applog Library
// 进程级结构化日志：滚动文件 + 控制台、按级别的日志入口、HTTP 访问日志

pub mod config;
pub mod errors;
pub mod logging;

pub use errors::LogError;
pub use logging::{Logger, LoggingSetup};
