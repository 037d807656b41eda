// 配置验证器

use crate::config::{AppConfig, LoggingConfig, ServerConfig};
use crate::errors::LogError;

/// 配置验证器
pub struct ConfigValidator;

impl ConfigValidator {
    /// 验证完整配置
    pub fn validate_all(config: &AppConfig) -> Result<(), Vec<LogError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_logging(&config.logging) {
            errors.push(e);
        }

        if let Err(e) = Self::validate_server(&config.server) {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// 验证日志配置
    pub fn validate_logging(config: &LoggingConfig) -> Result<(), LogError> {
        config.level_filter()?;

        if config.retention_days == 0 {
            return Err(LogError::configuration("日志保留天数必须大于 0"));
        }

        if let Some(name) = config.app_name() {
            if name.contains(['/', '\\']) {
                return Err(LogError::configuration(format!(
                    "应用名称不能包含路径分隔符: {}",
                    name
                )));
            }
        }

        Ok(())
    }

    /// 验证服务器配置
    pub fn validate_server(config: &ServerConfig) -> Result<(), LogError> {
        if config.port == 0 {
            return Err(LogError::configuration("服务器端口不能为 0"));
        }

        if config.host.is_empty() {
            return Err(LogError::configuration("服务器主机地址不能为空"));
        }

        Ok(())
    }
}
