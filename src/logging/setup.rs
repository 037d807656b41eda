// 日志系统设置
// 组装滚动文件输出（JSON）与控制台输出（文本），并安装进程级单例

use crate::config::LoggingConfig;
use crate::errors::LogError;

use tracing::Dispatch;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, time::ChronoLocal, MakeWriter},
    layer::SubscriberExt,
};

use super::facade;
use super::logger::Logger;

/// ISO-8601 时间格式，毫秒精度，带时区偏移
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// 日志文件后缀
pub const LOG_FILE_SUFFIX: &str = "log";

/// 日志系统初始化器
pub struct LoggingSetup;

impl LoggingSetup {
    /// 初始化进程级日志系统
    ///
    /// 只能调用一次。文件输出无法打开时返回致命错误，调用方应当终止启动。
    pub fn init(config: &LoggingConfig) -> Result<&'static Logger, LogError> {
        if facade::logger().is_some() {
            return Err(LogError::AlreadyInitialized);
        }

        let logger = Self::build(config)?;
        let logger = Self::install(logger)?;

        tracing::info!(
            log_dir = %config.log_dir().display(),
            app_name = config.app_name().unwrap_or(""),
            retention_days = config.retention_days,
            "日志系统初始化完成"
        );

        Ok(logger)
    }

    /// 把已构建的日志句柄设为进程单例，并作为全局 tracing 订阅器
    pub fn install(logger: Logger) -> Result<&'static Logger, LogError> {
        if facade::logger().is_some() {
            return Err(LogError::AlreadyInitialized);
        }

        tracing::dispatcher::set_global_default(logger.dispatch().clone())?;
        facade::install(logger)
    }

    /// 构建日志句柄：滚动文件 + 标准输出
    pub fn build(config: &LoggingConfig) -> Result<Logger, LogError> {
        let file = Self::open_file_sink(config)?;
        Self::with_writers(config, file, std::io::stdout)
    }

    /// 打开按天滚动的文件输出
    pub fn open_file_sink(config: &LoggingConfig) -> Result<RollingFileAppender, LogError> {
        let log_dir = config.log_dir();

        let mut builder = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(config.retention_days);

        if let Some(name) = config.app_name() {
            builder = builder.filename_prefix(name);
        }

        builder
            .build(&log_dir)
            .map_err(|e| LogError::sink_unavailable(log_dir.display().to_string(), e.to_string()))
    }

    /// 使用任意输出构建日志句柄
    ///
    /// 两个输出接收同样的条目，不做单独的级别过滤。
    pub fn with_writers<F, C>(config: &LoggingConfig, file: F, console: C) -> Result<Logger, LogError>
    where
        F: for<'w> MakeWriter<'w> + Send + Sync + 'static,
        C: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let level = config.level_filter()?;

        let file_layer = fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .with_timer(ChronoLocal::new(ISO8601_FORMAT.to_string()))
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(false)
            .with_writer(file);

        let console_layer = fmt::layer()
            .with_timer(ChronoLocal::new(ISO8601_FORMAT.to_string()))
            .with_target(false)
            .with_ansi(config.console_ansi)
            .with_writer(console);

        let subscriber = tracing_subscriber::registry()
            .with(level)
            .with(file_layer)
            .with(console_layer);

        Ok(Logger::new(Dispatch::new(subscriber)))
    }
}
