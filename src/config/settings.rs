// 应用程序设置和配置
// 定义日志与演示服务器的配置结构体和加载逻辑

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

use crate::errors::LogError;

/// 日志文件默认保留天数
pub const DEFAULT_RETENTION_DAYS: usize = 10;

/// 应用程序配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub server: ServerConfig,
}

/// 日志配置
///
/// 环境变量使用 `APP_` 前缀：`APP_ROOT`、`APP_NAME`、`APP_LOG_LEVEL`、
/// `APP_RETENTION_DAYS`、`APP_CONSOLE_ANSI`。空字符串视为未设置。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 应用根目录，日志写入 `<root>/storage/logs`
    pub root: String,
    /// 应用名称，作为日志文件名前缀
    pub name: Option<String>,
    pub log_level: String,
    pub retention_days: usize,
    pub console_ansi: bool,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            logging: LoggingConfig::load()?,
            server: ServerConfig::load()?,
        })
    }
}

impl LoggingConfig {
    /// 从默认值和 `APP_*` 环境变量加载
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(Config::try_from(&LoggingConfig::default())?)
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?;

        config.try_deserialize()
    }

    /// 应用根目录，未设置时为当前目录
    pub fn root_dir(&self) -> PathBuf {
        if self.root.trim().is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.root)
        }
    }

    /// 日志目录：`<root>/storage/logs`
    pub fn log_dir(&self) -> PathBuf {
        self.root_dir().join("storage").join("logs")
    }

    /// 非空的应用名称
    pub fn app_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// 解析日志级别
    pub fn level_filter(&self) -> Result<LevelFilter, LogError> {
        LevelFilter::from_str(self.log_level.trim()).map_err(|_| {
            LogError::configuration(format!("无效的日志级别: {}", self.log_level))
        })
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            name: None,
            log_level: "debug".to_string(),
            retention_days: DEFAULT_RETENTION_DAYS,
            console_ansi: true,
        }
    }
}

impl ServerConfig {
    /// 从默认值和 `SERVER_*` 环境变量加载
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(Config::try_from(&ServerConfig::default())?)
            .add_source(Environment::with_prefix("SERVER").try_parsing(true))
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}
