// 日志句柄
// 可注入的长生命周期日志实例，全局门面只是它的一个进程级副本

use serde::Serialize;
use std::backtrace::Backtrace;
use std::fmt::{self, Display};
use std::panic::Location;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Dispatch, Level};

use super::access::{AccessLogRecord, Exchange, ACCESS_LOG_TYPE};
use super::format::{encode_fields, render_value};

/// 日志句柄
///
/// 克隆开销很小，克隆出的句柄共享同一组输出。
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    serialization_failures: Arc<AtomicU64>,
}

impl Logger {
    pub fn new(dispatch: Dispatch) -> Self {
        Self {
            dispatch,
            serialization_failures: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// 多值编码失败被丢弃的次数
    pub fn serialization_failures(&self) -> u64 {
        self.serialization_failures.load(Ordering::Relaxed)
    }

    /// 格式化形式，无条件输出
    #[track_caller]
    pub fn log_args(&self, level: Level, args: fmt::Arguments<'_>) {
        let message = match args.as_str() {
            Some(s) => s.to_string(),
            None => args.to_string(),
        };
        self.emit(level, &message, Location::caller());
    }

    /// 单值形式，渲染结果为空时不输出
    #[track_caller]
    pub fn log_value<T: Display + ?Sized>(&self, level: Level, value: &T) {
        let message = render_value(value);
        if message.is_empty() {
            return;
        }
        self.emit(level, &message, Location::caller());
    }

    /// 多值形式，编码为一个 JSON 数组
    ///
    /// 没有值时不输出；编码失败时计数后丢弃，不向调用方报告。
    #[track_caller]
    pub fn log_fields<I, T>(&self, level: Level, fields: I)
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        let mut fields = fields.into_iter().peekable();
        if fields.peek().is_none() {
            return;
        }

        match encode_fields(fields) {
            Ok(message) => self.emit(level, &message, Location::caller()),
            Err(_) => {
                self.serialization_failures.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// 输出一条访问日志
    #[track_caller]
    pub fn access<E: Exchange + ?Sized>(&self, exchange: &E) {
        let record = AccessLogRecord::from_exchange(exchange);
        self.access_record(&record);
    }

    #[track_caller]
    pub fn access_record(&self, record: &AccessLogRecord) {
        let caller = Location::caller();
        tracing::dispatcher::with_default(&self.dispatch, || {
            tracing::info!(
                caller = %caller,
                "type" = ACCESS_LOG_TYPE,
                path = %record.path,
                method = %record.method,
                status = record.status,
                "userAgent" = %record.user_agent,
                "requestIP" = %record.request_ip,
                "requestID" = %record.request_id,
                "httpReferer" = record.referer.as_deref(),
                "clientID" = record.client_id.as_deref(),
                durations = record.durations.as_deref(),
                response = record.response.as_deref(),
            );
        });
    }

    fn emit(&self, level: Level, message: &str, caller: &'static Location<'static>) {
        tracing::dispatcher::with_default(&self.dispatch, || {
            if level == Level::ERROR {
                let stacktrace = Backtrace::force_capture();
                tracing::error!(caller = %caller, stacktrace = %stacktrace, "{}", message);
            } else if level == Level::WARN {
                tracing::warn!(caller = %caller, "{}", message);
            } else if level == Level::INFO {
                tracing::info!(caller = %caller, "{}", message);
            } else if level == Level::DEBUG {
                tracing::debug!(caller = %caller, "{}", message);
            } else {
                tracing::trace!(caller = %caller, "{}", message);
            }
        });
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("serialization_failures", &self.serialization_failures())
            .finish()
    }
}
