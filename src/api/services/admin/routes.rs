//! Admin API 路由配置

use actix_web::web;

use super::auth::{login, login_rate_limiter, logout, session};
use super::dashboard::dashboard;
use super::resources::{create_resource, delete_resource, update_resource};
use super::weeks::{create_week, delete_week, get_week, list_weeks, set_visibility, update_week};

/// 认证路由 `/auth`
///
/// - POST /auth/login - 登录（按客户端 IP 限流）
/// - POST /auth/logout - 登出
/// - GET /auth/session - 当前会话
pub fn auth_routes(trusted_proxies: Vec<String>) -> actix_web::Scope {
    let login_route = match login_rate_limiter(trusted_proxies) {
        Some(limiter) => web::post().to(login).wrap(limiter),
        None => {
            tracing::warn!("Login rate limiter unavailable, login is not throttled");
            web::post().to(login)
        }
    };

    web::scope("/auth")
        .route("/login", login_route)
        .route("/logout", web::post().to(logout))
        .route("/session", web::get().to(session))
}

/// 周次与资源路由 `/weeks`
pub fn weeks_routes() -> actix_web::Scope {
    web::scope("/weeks")
        .route("", web::get().to(list_weeks))
        .route("", web::post().to(create_week))
        .route("/{id}", web::get().to(get_week))
        .route("/{id}", web::put().to(update_week))
        .route("/{id}", web::delete().to(delete_week))
        .route("/{id}/visibility", web::put().to(set_visibility))
        .route("/{id}/resources", web::post().to(create_resource))
        .route("/{id}/resources/{rid}", web::put().to(update_resource))
        .route("/{id}/resources/{rid}", web::delete().to(delete_resource))
}

/// 管理 API 全部路由（挂在 admin 前缀下，由 StaffAuth 保护）
pub fn admin_routes(cfg: &mut web::ServiceConfig, trusted_proxies: Vec<String>) {
    cfg.service(auth_routes(trusted_proxies))
        .service(weeks_routes())
        .route("/dashboard", web::get().to(dashboard));
}
