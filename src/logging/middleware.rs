// 访问日志与请求 ID 中间件

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{
        header::{HeaderName, HeaderValue},
        StatusCode,
    },
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use super::access::{AccessLogRecord, HttpExchange};
use super::context::{RequestId, REQUEST_ID_HEADER};
use super::logger::Logger;

/// 请求 ID 中间件
///
/// 复用请求头中的 `X-Request-ID`，没有时生成新的 UUID；
/// 写入请求扩展并回写到响应头。
pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestIdMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let request_id = RequestId::from_header_or_new(
                req.headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|h| h.to_str().ok()),
            );
            req.extensions_mut().insert(request_id.clone());

            let mut response = service.call(req).await?;

            if let Ok(value) = HeaderValue::from_str(&request_id.0) {
                response
                    .headers_mut()
                    .insert(HeaderName::from_static("x-request-id"), value);
            }

            Ok(response)
        })
    }
}

/// 访问日志中间件
///
/// 内部服务完成后（包括返回错误的情况）输出一条访问日志。
/// 不能在调用内部服务前克隆 `HttpRequest`，路由阶段要求独占它。
pub struct AccessLogMiddleware {
    logger: Logger,
}

impl AccessLogMiddleware {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessLogMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessLogMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessLogMiddlewareService {
            service: Rc::new(service),
            logger: self.logger.clone(),
        }))
    }
}

pub struct AccessLogMiddlewareService<S> {
    service: Rc<S>,
    logger: Logger,
}

impl<S, B> Service<ServiceRequest> for AccessLogMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let logger = self.logger.clone();

        Box::pin(async move {
            // 错误分支拿不到请求，先记下请求侧字段
            let snapshot =
                AccessLogRecord::from_exchange(&HttpExchange::new(req.request(), StatusCode::OK));

            match service.call(req).await {
                Ok(response) => {
                    logger.access(&HttpExchange::from(&response));
                    Ok(response)
                }
                Err(err) => {
                    let record = AccessLogRecord {
                        status: err.as_response_error().status_code().as_u16(),
                        ..snapshot
                    };
                    logger.access_record(&record);
                    Err(err)
                }
            }
        })
    }
}
