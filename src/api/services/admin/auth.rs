//! Admin API 认证相关端点

use actix_governor::{Governor, GovernorConfigBuilder, KeyExtractor, SimpleKeyExtractionError};
use actix_web::dev::ServiceRequest;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use chrono::DateTime;
use governor::middleware::NoOpMiddleware;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::api::jwt::JwtService;
use crate::api::middleware::StaffSession;
use crate::services::StaffService;
use crate::services::validation::sanitize_redirect;

use super::error_code::ErrorCode;
use super::helpers::{CookieBuilder, error_from_portal, error_response, success_response};
use super::types::{LoginCredentials, LoginResponse, MessageResponse, SessionResponse};

/// 基于 IP 地址的限流 key 提取器
///
/// 默认使用连接 IP（peer_addr）；连接来自可信代理时才读取 X-Forwarded-For。
#[derive(Clone)]
pub struct LoginKeyExtractor {
    trusted_proxies: Arc<Vec<String>>,
}

impl LoginKeyExtractor {
    pub fn new(trusted_proxies: Vec<String>) -> Self {
        Self {
            trusted_proxies: Arc::new(trusted_proxies),
        }
    }
}

impl KeyExtractor for LoginKeyExtractor {
    type Key = String;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        let conn_info = req.connection_info();

        let peer_ip = conn_info
            .peer_addr()
            .ok_or_else(|| SimpleKeyExtractionError::new("Unable to extract peer IP"))?;

        if is_trusted_proxy(peer_ip, &self.trusted_proxies) {
            let real_ip = conn_info.realip_remote_addr().unwrap_or(peer_ip);
            debug!("Login rate limit key from trusted proxy: {}", real_ip);
            Ok(real_ip.to_string())
        } else {
            Ok(peer_ip.to_string())
        }
    }
}

/// 检查 IP 是否在可信代理列表中（单 IP 或 CIDR）
fn is_trusted_proxy(ip: &str, trusted_proxies: &[String]) -> bool {
    let Ok(ip_addr) = ip.parse::<IpAddr>() else {
        return false;
    };

    trusted_proxies.iter().any(|proxy| {
        if proxy.contains('/') {
            ip_in_cidr(&ip_addr, proxy)
        } else {
            proxy.parse::<IpAddr>().is_ok_and(|p| p == ip_addr)
        }
    })
}

fn ip_in_cidr(ip: &IpAddr, cidr: &str) -> bool {
    let Some((network, prefix_len)) = cidr.split_once('/') else {
        return false;
    };
    let Ok(prefix_len) = prefix_len.parse::<u32>() else {
        return false;
    };
    let Ok(network_addr) = network.parse::<IpAddr>() else {
        return false;
    };

    match (ip, network_addr) {
        (IpAddr::V4(ip), IpAddr::V4(net)) if prefix_len <= 32 => {
            let mask = u32::MAX.checked_shl(32 - prefix_len).unwrap_or(0);
            (u32::from(*ip) & mask) == (u32::from(net) & mask)
        }
        (IpAddr::V6(ip), IpAddr::V6(net)) if prefix_len <= 128 => {
            let mask = u128::MAX.checked_shl(128 - prefix_len).unwrap_or(0);
            (u128::from(*ip) & mask) == (u128::from(net) & mask)
        }
        _ => false,
    }
}

/// 创建登录限流器
///
/// 每秒补充 1 个令牌，突发最多 5 次请求，超限返回 429。
pub fn login_rate_limiter(
    trusted_proxies: Vec<String>,
) -> Option<Governor<LoginKeyExtractor, NoOpMiddleware>> {
    let config = GovernorConfigBuilder::default()
        .seconds_per_request(1)
        .burst_size(5)
        .key_extractor(LoginKeyExtractor::new(trusted_proxies))
        .finish()?;

    debug!("Login rate limiter created: 1 req/s, burst 5");
    Some(Governor::new(&config))
}

/// POST /auth/login
pub async fn login(
    body: web::Json<LoginCredentials>,
    staff: web::Data<Arc<StaffService>>,
    jwt: web::Data<Arc<JwtService>>,
    cookies: web::Data<CookieBuilder>,
) -> ActixResult<impl Responder> {
    let LoginCredentials {
        email,
        password,
        redirect_to,
    } = body.into_inner();

    let user = match staff.authenticate(&email, &password).await {
        Ok(user) => user,
        Err(e) => return Ok(error_from_portal(&e)),
    };

    let token = match jwt.generate_session_token(&user.email) {
        Ok(token) => token,
        Err(e) => {
            error!("Admin API: failed to generate session token: {}", e);
            return Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Failed to generate session",
            ));
        }
    };

    info!("Admin API: staff {} signed in", user.email);

    let cookie = cookies.build_session_cookie(token);
    let mut response = success_response(LoginResponse {
        message: "Login successful".to_string(),
        expires_in: jwt.session_minutes() * 60,
        redirect_to: sanitize_redirect(redirect_to.as_deref()),
    });
    response.add_cookie(&cookie)?;
    Ok(response)
}

/// POST /auth/logout
pub async fn logout(cookies: web::Data<CookieBuilder>) -> ActixResult<impl Responder> {
    let mut response = success_response(MessageResponse {
        message: "Logout successful".to_string(),
    });
    response.add_cookie(&cookies.build_expired_session_cookie())?;
    Ok(response)
}

/// GET /auth/session
pub async fn session(session: StaffSession) -> HttpResponse {
    match DateTime::from_timestamp(session.expires_at, 0) {
        Some(expires_at) => success_response(SessionResponse {
            email: session.email,
            expires_at,
        }),
        None => error_response(
            StatusCode::UNAUTHORIZED,
            ErrorCode::TokenInvalid,
            "Session expiry out of range",
        ),
    }
}
