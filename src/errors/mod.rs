// 错误处理模块
// 定义日志系统初始化阶段的错误类型

pub mod types;

#[cfg(test)]
mod tests;

pub use types::*;
