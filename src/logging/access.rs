// HTTP 访问日志记录

use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::HttpRequest;
use std::net::SocketAddr;

use super::context;

/// 访问日志的 `type` 字段值
pub const ACCESS_LOG_TYPE: &str = "access";

/// 一次 HTTP 请求/响应交换
///
/// 访问日志只通过这个接口读取数据，不写入任何上下文值。
/// 未知或缺失的值返回空字符串。
pub trait Exchange {
    fn path(&self) -> String;
    fn method(&self) -> String;
    fn status(&self) -> u16;
    fn user_agent(&self) -> String;
    fn client_ip(&self) -> String;
    fn referer(&self) -> String;
    fn request_id(&self) -> String;
    fn client_session(&self) -> String;
    fn durations(&self) -> String;
    fn cached_response(&self) -> String;
}

/// 访问日志记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLogRecord {
    pub path: String,
    pub method: String,
    pub status: u16,
    pub user_agent: String,
    pub request_ip: String,
    pub request_id: String,
    pub referer: Option<String>,
    pub client_id: Option<String>,
    pub durations: Option<String>,
    pub response: Option<String>,
}

impl AccessLogRecord {
    /// 从交换上下文提取记录，可选字段只在非空时保留
    pub fn from_exchange<E: Exchange + ?Sized>(exchange: &E) -> Self {
        Self {
            path: exchange.path(),
            method: exchange.method(),
            status: exchange.status(),
            user_agent: exchange.user_agent(),
            request_ip: exchange.client_ip(),
            request_id: exchange.request_id(),
            referer: non_empty(exchange.referer()),
            client_id: non_empty(exchange.client_session()),
            durations: non_empty(exchange.durations()),
            response: non_empty(exchange.cached_response()),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// actix-web 请求加响应状态
pub struct HttpExchange<'a> {
    request: &'a HttpRequest,
    status: StatusCode,
}

impl<'a> HttpExchange<'a> {
    pub fn new(request: &'a HttpRequest, status: StatusCode) -> Self {
        Self { request, status }
    }
}

impl<'a, B> From<&'a ServiceResponse<B>> for HttpExchange<'a> {
    fn from(res: &'a ServiceResponse<B>) -> Self {
        Self::new(res.request(), res.status())
    }
}

impl Exchange for HttpExchange<'_> {
    fn path(&self) -> String {
        self.request.path().to_string()
    }

    fn method(&self) -> String {
        self.request.method().as_str().to_string()
    }

    fn status(&self) -> u16 {
        self.status.as_u16()
    }

    fn user_agent(&self) -> String {
        context::header_value(self.request, header::USER_AGENT.as_str())
    }

    fn client_ip(&self) -> String {
        let info = self.request.connection_info();
        info.realip_remote_addr().map(strip_port).unwrap_or_default()
    }

    fn referer(&self) -> String {
        context::header_value(self.request, header::REFERER.as_str())
    }

    fn request_id(&self) -> String {
        context::request_id(self.request)
    }

    fn client_session(&self) -> String {
        context::client_session(self.request)
    }

    fn durations(&self) -> String {
        context::request_durations(self.request)
    }

    fn cached_response(&self) -> String {
        context::cached_response(self.request)
    }
}

/// 去掉地址中的端口部分
fn strip_port(addr: &str) -> String {
    match addr.parse::<SocketAddr>() {
        Ok(socket) => socket.ip().to_string(),
        Err(_) => addr.trim_matches(|c| c == '[' || c == ']').to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::context::{CachedResponse, ClientSession, RequestDurations, RequestId};
    use actix_web::test::TestRequest;
    use actix_web::HttpMessage;

    fn base_request() -> TestRequest {
        TestRequest::get()
            .uri("/orders/42?expand=items")
            .insert_header((header::USER_AGENT, "probe/1.0"))
            .peer_addr("10.1.2.3:5555".parse().unwrap())
    }

    #[test]
    fn test_mandatory_fields() {
        let req = base_request().to_http_request();
        req.extensions_mut().insert(RequestId("req-1".to_string()));

        let record = AccessLogRecord::from_exchange(&HttpExchange::new(&req, StatusCode::OK));

        assert_eq!(record.path, "/orders/42");
        assert_eq!(record.method, "GET");
        assert_eq!(record.status, 200);
        assert_eq!(record.user_agent, "probe/1.0");
        assert_eq!(record.request_ip, "10.1.2.3");
        assert_eq!(record.request_id, "req-1");
        assert_eq!(record.referer, None);
        assert_eq!(record.client_id, None);
        assert_eq!(record.durations, None);
        assert_eq!(record.response, None);
    }

    #[test]
    fn test_referer_only_when_present() {
        let req = base_request().to_http_request();
        let record = AccessLogRecord::from_exchange(&HttpExchange::new(&req, StatusCode::OK));
        assert_eq!(record.referer, None);

        let req = base_request()
            .insert_header((header::REFERER, "http://x"))
            .to_http_request();
        let record = AccessLogRecord::from_exchange(&HttpExchange::new(&req, StatusCode::OK));
        assert_eq!(record.referer.as_deref(), Some("http://x"));
    }

    #[test]
    fn test_client_session_only_when_present() {
        let req = base_request().to_http_request();
        req.extensions_mut().insert(ClientSession(String::new()));
        let record = AccessLogRecord::from_exchange(&HttpExchange::new(&req, StatusCode::OK));
        assert_eq!(record.client_id, None);

        req.extensions_mut().insert(ClientSession("sid-9".to_string()));
        let record = AccessLogRecord::from_exchange(&HttpExchange::new(&req, StatusCode::OK));
        assert_eq!(record.client_id.as_deref(), Some("sid-9"));
    }

    #[test]
    fn test_durations_only_when_present() {
        let req = base_request().to_http_request();
        let record = AccessLogRecord::from_exchange(&HttpExchange::new(&req, StatusCode::OK));
        assert_eq!(record.durations, None);

        req.extensions_mut()
            .insert(RequestDurations("db=3ms,render=1ms".to_string()));
        let record = AccessLogRecord::from_exchange(&HttpExchange::new(&req, StatusCode::OK));
        assert_eq!(record.durations.as_deref(), Some("db=3ms,render=1ms"));
    }

    #[test]
    fn test_cached_response_only_when_present() {
        let req = base_request().to_http_request();
        let record = AccessLogRecord::from_exchange(&HttpExchange::new(&req, StatusCode::OK));
        assert_eq!(record.response, None);

        req.extensions_mut()
            .insert(CachedResponse(r#"{"ok":true}"#.to_string()));
        let record = AccessLogRecord::from_exchange(&HttpExchange::new(&req, StatusCode::OK));
        assert_eq!(record.response.as_deref(), Some(r#"{"ok":true}"#));
    }

    #[test]
    fn test_request_id_falls_back_to_header() {
        let req = base_request()
            .insert_header((context::REQUEST_ID_HEADER, "upstream-7"))
            .to_http_request();
        let record =
            AccessLogRecord::from_exchange(&HttpExchange::new(&req, StatusCode::NOT_FOUND));
        assert_eq!(record.request_id, "upstream-7");
        assert_eq!(record.status, 404);
    }

    #[test]
    fn test_forwarded_client_ip() {
        let req = base_request()
            .insert_header(("X-Forwarded-For", "203.0.113.9, 10.0.0.1"))
            .to_http_request();
        let record = AccessLogRecord::from_exchange(&HttpExchange::new(&req, StatusCode::OK));
        assert_eq!(record.request_ip, "203.0.113.9");
    }

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("127.0.0.1:8080"), "127.0.0.1");
        assert_eq!(strip_port("[::1]:8080"), "::1");
        assert_eq!(strip_port("192.168.0.5"), "192.168.0.5");
    }
}
