// 日志门面错误类型定义

use thiserror::Error;

/// 日志系统统一错误类型
///
/// 只有初始化阶段会产生错误；日志调用本身从不向调用方返回失败。
#[derive(Debug, Error)]
pub enum LogError {
    /// 配置错误
    #[error("配置错误: {message}")]
    Configuration { message: String },

    /// 滚动文件输出无法创建
    #[error("无法打开日志文件输出 {path}: {message}")]
    SinkUnavailable { path: String, message: String },

    /// 日志单例已经初始化
    #[error("日志系统已经初始化")]
    AlreadyInitialized,

    /// 全局 tracing 订阅器设置失败
    #[error("日志订阅器设置失败: {message}")]
    Subscriber { message: String },
}

impl LogError {
    /// 获取错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::SinkUnavailable { .. } => "SINK_UNAVAILABLE",
            Self::AlreadyInitialized => "ALREADY_INITIALIZED",
            Self::Subscriber { .. } => "SUBSCRIBER_ERROR",
        }
    }

    /// 是否为致命错误（进程应当终止启动）
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::AlreadyInitialized)
    }

    /// 创建配置错误
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// 创建文件输出错误
    pub fn sink_unavailable(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkUnavailable {
            path: path.into(),
            message: message.into(),
        }
    }

    /// 创建订阅器错误
    pub fn subscriber(message: impl Into<String>) -> Self {
        Self::Subscriber {
            message: message.into(),
        }
    }
}

impl From<config::ConfigError> for LogError {
    fn from(err: config::ConfigError) -> Self {
        Self::configuration(err.to_string())
    }
}

impl From<tracing::dispatcher::SetGlobalDefaultError> for LogError {
    fn from(err: tracing::dispatcher::SetGlobalDefaultError) -> Self {
        Self::subscriber(err.to_string())
    }
}
