// 请求上下文值
// 由前置中间件或处理器写入请求扩展，访问日志只读取

use actix_web::{HttpMessage, HttpRequest};
use uuid::Uuid;

/// 请求 ID 请求头
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// 请求关联 ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// 客户端会话 ID（访问日志中的 `clientID`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSession(pub String);

/// 预先计算好的各阶段耗时描述（访问日志中的 `durations`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDurations(pub String);

/// 需要记录的响应快照（访问日志中的 `response`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse(pub String);

impl RequestId {
    /// 复用请求头中的 ID，否则生成新的 UUID
    pub fn from_header_or_new(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Self(id.to_string()),
            None => Self(Uuid::new_v4().to_string()),
        }
    }
}

/// 从请求扩展中读取请求 ID，退回到请求头
pub fn request_id(req: &HttpRequest) -> String {
    if let Some(id) = req.extensions().get::<RequestId>() {
        return id.0.clone();
    }

    header_value(req, REQUEST_ID_HEADER)
}

pub fn client_session(req: &HttpRequest) -> String {
    req.extensions()
        .get::<ClientSession>()
        .map(|v| v.0.clone())
        .unwrap_or_default()
}

pub fn request_durations(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestDurations>()
        .map(|v| v.0.clone())
        .unwrap_or_default()
}

pub fn cached_response(req: &HttpRequest) -> String {
    req.extensions()
        .get::<CachedResponse>()
        .map(|v| v.0.clone())
        .unwrap_or_default()
}

/// 读取请求头，缺失或非 ASCII 时返回空字符串
pub fn header_value(req: &HttpRequest, name: &str) -> String {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_default()
}
