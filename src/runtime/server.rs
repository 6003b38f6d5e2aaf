//! Server mode
//!
//! HTTP server startup: shared state, middleware stack and route mounting.

use actix_cors::Cors;
use actix_web::{
    App, HttpResponse, HttpServer,
    error::InternalError,
    http::StatusCode,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::{error, warn};

use crate::api::constants::{ADMIN_PREFIX, MAX_PAYLOAD_BYTES};
use crate::api::middleware::{RequestIdMiddleware, StaffAuth};
use crate::api::services::admin::{ErrorCode, admin_routes, error_response};
use crate::api::services::{AppStartTime, health_routes, public_routes};
use crate::config::{CorsConfig, StaticConfig};
use crate::runtime::lifetime;

use super::lifetime::startup::StartupContext;

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors_config: &CorsConfig) {
    if !cors_config.enabled {
        return;
    }

    if cors_config.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty. \
            No cross-origin requests will be allowed."
        );
    }

    let is_any_origin = cors_config.allowed_origins.iter().any(|o| o == "*");
    if is_any_origin && cors_config.allow_credentials {
        error!(
            "SECURITY WARNING: allow_any_origin + allow_credentials is a dangerous combination! \
            Disabling credentials for safety."
        );
    }
}

/// Build CORS middleware from configuration
fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    // 未启用时使用浏览器默认的同源策略
    if !cors_config.enabled {
        return Cors::default();
    }

    let is_any_origin = cors_config.allowed_origins.iter().any(|o| o == "*");

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec!["Content-Type", "Authorization", "Accept", "X-Request-ID"])
        .max_age(cors_config.max_age as usize);

    if is_any_origin {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    // any origin + credentials 强制禁用
    if cors_config.allow_credentials && !is_any_origin {
        cors = cors.supports_credentials();
    }

    cors
}

/// JSON 请求体解析失败时也返回统一的 `{code, message, data}` 结构
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_PAYLOAD_BYTES)
        .error_handler(|err, _req| {
            let message = format!("Invalid request body: {}", err);
            let response = error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, &message);
            InternalError::from_response(err, response).into()
        })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid query: {}", err);
        let response = error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, &message);
        InternalError::from_response(err, response).into()
    })
}

async fn not_found() -> HttpResponse {
    error_response(StatusCode::NOT_FOUND, ErrorCode::NotFound, "Not Found")
}

/// 注册共享状态和全部路由
///
/// 服务器与集成测试共用，保证两边的路由表一致。
pub fn configure_app(cfg: &mut web::ServiceConfig, ctx: &StartupContext) {
    let trusted_proxies = ctx.trusted_proxies.clone();

    cfg.app_data(web::Data::new(ctx.storage.clone()))
        .app_data(web::Data::new(ctx.course_service.clone()))
        .app_data(web::Data::new(ctx.staff_service.clone()))
        .app_data(web::Data::new(ctx.jwt_service.clone()))
        .app_data(web::Data::new(ctx.cookie_builder.clone()))
        .app_data(json_config())
        .app_data(query_config())
        .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
        .service(
            web::scope(ADMIN_PREFIX)
                .wrap(StaffAuth::new(
                    ctx.jwt_service.clone(),
                    ctx.cookie_builder.cookie_name(),
                    ADMIN_PREFIX,
                ))
                .configure(move |scope| admin_routes(scope, trusted_proxies)),
        )
        .service(public_routes())
        .service(health_routes())
        .default_service(web::to(not_found));
}

/// Run the HTTP server
///
/// 1. 准备共享组件（存储、服务、JWT）
/// 2. 配置并启动 HTTP 服务器
/// 3. 等待关闭信号
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: StaticConfig) -> Result<()> {
    let app_start_time = AppStartTime::now();

    let ctx = lifetime::startup::prepare_server_startup(&config)
        .await
        .map_err(|e| {
            error!("Server startup failed: {:#}", e);
            e
        })?;

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    if ctx.trusted_proxies.is_empty() {
        warn!("Login rate limiting keyed by peer IP (no trusted proxies configured)");
    } else {
        warn!(
            "Login rate limiting: trusted proxies configured: {:?}",
            ctx.trusted_proxies
        );
    }

    let db_for_shutdown = ctx.storage.get_db().clone();

    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&cors_config);

        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate"))
                    .add(("X-Content-Type-Options", "nosniff")),
            )
            .app_data(web::Data::new(app_start_time.clone()))
            .configure(|cfg| configure_app(cfg, &ctx))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count)
    .disable_signals();

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(&bind_address)?.run();
    let handle = server.handle();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::wait_for_signal() => {
            warn!("Shutdown signal received, draining connections...");
            handle.stop(true).await;
        }
    }

    lifetime::shutdown::close_database(&db_for_shutdown).await;
    warn!("Graceful shutdown completed");
    Ok(())
}
