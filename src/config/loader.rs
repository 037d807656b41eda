// 配置加载器
// 处理 .env 文件加载和环境变量解析

use crate::config::{AppConfig, ConfigValidator};
use crate::errors::LogError;
use dotenvy::dotenv;

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 加载并验证配置
    ///
    /// 环境变量只在这里读取一次；日志系统此时尚未初始化，
    /// 所以 `.env` 缺失不做记录。
    pub fn init() -> Result<AppConfig, LogError> {
        let _ = dotenv();

        let config = AppConfig::load()?;

        ConfigValidator::validate_all(&config).map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            LogError::configuration(format!("配置验证失败: {}", messages.join("; ")))
        })?;

        Ok(config)
    }

    /// 打印配置摘要
    pub fn print_summary(config: &AppConfig) {
        tracing::info!(
            root = %config.logging.root_dir().display(),
            app_name = config.logging.app_name().unwrap_or(""),
            log_dir = %config.logging.log_dir().display(),
            level = %config.logging.log_level,
            retention_days = config.logging.retention_days,
            "日志配置"
        );
        tracing::info!(
            host = %config.server.host,
            port = config.server.port,
            "服务器配置"
        );
    }
}
