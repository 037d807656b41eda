// 日志系统模块
// 滚动文件 + 控制台双输出、按级别的日志入口和 HTTP 访问日志

pub mod setup;
pub mod logger;
pub mod format;
pub mod context;
pub mod access;
pub mod middleware;
pub mod facade;


pub use setup::*;
pub use logger::*;
pub use format::*;
pub use context::*;
pub use access::*;
pub use middleware::*;
pub use facade::*;
