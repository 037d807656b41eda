// 进程级日志门面
// 全局单例与按级别划分的便捷函数；初始化之前的调用不输出任何内容

use serde::Serialize;
use std::fmt::{self, Display};
use std::sync::OnceLock;
use tracing::Level;

use super::access::Exchange;
use super::logger::Logger;
use crate::errors::LogError;

/// 全局日志实例
static LOGGER: OnceLock<Logger> = OnceLock::new();

/// 获取全局日志实例
pub fn logger() -> Option<&'static Logger> {
    LOGGER.get()
}

pub(crate) fn install(logger: Logger) -> Result<&'static Logger, LogError> {
    LOGGER
        .set(logger)
        .map_err(|_| LogError::AlreadyInitialized)?;
    LOGGER.get().ok_or(LogError::AlreadyInitialized)
}

#[track_caller]
fn log_args(level: Level, args: fmt::Arguments<'_>) {
    if let Some(logger) = logger() {
        logger.log_args(level, args);
    }
}

#[track_caller]
fn log_value<T: Display + ?Sized>(level: Level, value: &T) {
    if let Some(logger) = logger() {
        logger.log_value(level, value);
    }
}

#[track_caller]
fn log_fields<I, T>(level: Level, fields: I)
where
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    if let Some(logger) = logger() {
        logger.log_fields(level, fields);
    }
}

#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    log_args(Level::DEBUG, args);
}

#[track_caller]
pub fn debug<T: Display + ?Sized>(value: &T) {
    log_value(Level::DEBUG, value);
}

#[track_caller]
pub fn debug_fields<I: IntoIterator<Item = T>, T: Serialize>(fields: I) {
    log_fields(Level::DEBUG, fields);
}

#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    log_args(Level::INFO, args);
}

#[track_caller]
pub fn info<T: Display + ?Sized>(value: &T) {
    log_value(Level::INFO, value);
}

#[track_caller]
pub fn info_fields<I: IntoIterator<Item = T>, T: Serialize>(fields: I) {
    log_fields(Level::INFO, fields);
}

#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    log_args(Level::WARN, args);
}

#[track_caller]
pub fn warn<T: Display + ?Sized>(value: &T) {
    log_value(Level::WARN, value);
}

#[track_caller]
pub fn warn_fields<I: IntoIterator<Item = T>, T: Serialize>(fields: I) {
    log_fields(Level::WARN, fields);
}

#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    log_args(Level::ERROR, args);
}

#[track_caller]
pub fn error<T: Display + ?Sized>(value: &T) {
    log_value(Level::ERROR, value);
}

#[track_caller]
pub fn error_fields<I: IntoIterator<Item = T>, T: Serialize>(fields: I) {
    log_fields(Level::ERROR, fields);
}

/// 输出一条访问日志
#[track_caller]
pub fn access<E: Exchange + ?Sized>(exchange: &E) {
    if let Some(logger) = logger() {
        logger.access(exchange);
    }
}

/// 变参日志宏的公共实现：零个参数不输出，一个参数按 `Display` 输出，
/// 多个参数编码为 JSON 数组
#[doc(hidden)]
#[macro_export]
macro_rules! __log_variadic {
    ($single:path, $many:path $(,)?) => {
        ()
    };
    ($single:path, $many:path, $value:expr $(,)?) => {
        $single(&$value)
    };
    ($single:path, $many:path, $($value:expr),+ $(,)?) => {
        $many([$($crate::logging::Field::of(&$value)),+])
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($value:expr),* $(,)?) => {
        $crate::__log_variadic!($crate::logging::debug, $crate::logging::debug_fields, $($value),*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($value:expr),* $(,)?) => {
        $crate::__log_variadic!($crate::logging::info, $crate::logging::info_fields, $($value),*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($value:expr),* $(,)?) => {
        $crate::__log_variadic!($crate::logging::warn, $crate::logging::warn_fields, $($value),*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($value:expr),* $(,)?) => {
        $crate::__log_variadic!($crate::logging::error, $crate::logging::error_fields, $($value),*)
    };
}

#[macro_export]
macro_rules! log_debugf {
    ($($arg:tt)+) => {
        $crate::logging::debugf(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_infof {
    ($($arg:tt)+) => {
        $crate::logging::infof(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_warnf {
    ($($arg:tt)+) => {
        $crate::logging::warnf(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_errorf {
    ($($arg:tt)+) => {
        $crate::logging::errorf(format_args!($($arg)+))
    };
}
