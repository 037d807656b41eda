use actix_web::{web, App, HttpMessage, HttpRequest, HttpResponse, HttpServer, Result as ActixResult};
use anyhow::Context;

use applog::config::ConfigLoader;
use applog::logging::{AccessLogMiddleware, ClientSession, LoggingSetup, RequestIdMiddleware};
use applog::{log_info, log_infof, log_warn};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 初始化配置
    let config = ConfigLoader::init().context("配置加载失败")?;

    // 初始化日志系统，文件输出无法打开时直接终止启动
    let logger = LoggingSetup::init(&config.logging).context("日志系统初始化失败")?;

    ConfigLoader::print_summary(&config);
    log_infof!("🌐 服务器启动地址: http://{}:{}", config.server.host, config.server.port);

    let logger = logger.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(AccessLogMiddleware::new(logger.clone()))
            .wrap(RequestIdMiddleware)
            .route("/", web::get().to(index))
            .route("/health", web::get().to(health_check))
    })
    .bind((config.server.host.clone(), config.server.port))?
    .run()
    .await?;

    log_warn!("服务器已停止");
    Ok(())
}

/// 根路径处理器
async fn index(req: HttpRequest) -> ActixResult<HttpResponse> {
    if let Some(sid) = req.cookie("SID") {
        req.extensions_mut()
            .insert(ClientSession(sid.value().to_string()));
    }

    log_info!("index", req.path());

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "name": "applog",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}

/// 健康检查端点
async fn health_check() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "applog",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
