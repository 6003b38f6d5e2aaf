use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    http::{Method, header::CONTENT_TYPE},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{info, trace};

use crate::api::jwt::JwtService;
use crate::api::services::admin::{ApiResponse, ErrorCode};

/// 认证方式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMethod {
    /// Authorization: Bearer <token>
    Bearer,
    /// 会话 Cookie
    Cookie,
}

/// 已认证的教职员会话，由中间件写入 request extensions
#[derive(Clone, Debug)]
pub struct StaffSession {
    pub email: String,
    pub expires_at: i64,
    pub method: AuthMethod,
}

impl FromRequest for StaffSession {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<StaffSession>()
                .cloned()
                .ok_or_else(|| actix_web::error::ErrorUnauthorized("Unauthorized")),
        )
    }
}

/// Staff authentication middleware
///
/// 保护管理 API：除登录、登出和 CORS 预检外，所有请求必须携带有效会话。
#[derive(Clone)]
pub struct StaffAuth {
    jwt: Arc<JwtService>,
    cookie_name: String,
    admin_prefix: String,
}

impl StaffAuth {
    pub fn new(
        jwt: Arc<JwtService>,
        cookie_name: impl Into<String>,
        admin_prefix: impl Into<String>,
    ) -> Self {
        Self {
            jwt,
            cookie_name: cookie_name.into(),
            admin_prefix: admin_prefix.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for StaffAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = StaffAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StaffAuthMiddleware {
            service: Rc::new(service),
            jwt: self.jwt.clone(),
            cookie_name: self.cookie_name.clone(),
            public_paths: Rc::new([
                format!("{}/auth/login", self.admin_prefix),
                format!("{}/auth/logout", self.admin_prefix),
            ]),
        }))
    }
}

pub struct StaffAuthMiddleware<S> {
    service: Rc<S>,
    jwt: Arc<JwtService>,
    cookie_name: String,
    public_paths: Rc<[String; 2]>,
}

impl<S, B> StaffAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// Handle OPTIONS requests for CORS preflight
    fn handle_options_request(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        req.into_response(
            HttpResponse::NoContent()
                .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                .finish()
                .map_into_right_body(),
        )
    }

    fn handle_unauthorized(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        info!("Staff authentication failed - invalid or missing session");
        req.into_response(
            HttpResponse::Unauthorized()
                .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
                .json(ApiResponse::<()> {
                    code: ErrorCode::Unauthorized as i32,
                    message: "Unauthorized: sign in to continue".to_string(),
                    data: None,
                })
                .map_into_right_body(),
        )
    }

    /// 从 Authorization header 提取 Bearer token
    fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
        req.headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn extract_cookie_token(req: &ServiceRequest, cookie_name: &str) -> Option<String> {
        req.cookie(cookie_name)
            .map(|c| c.value().to_string())
            .filter(|s| !s.is_empty())
    }

    fn authenticate(
        jwt: &JwtService,
        req: &ServiceRequest,
        cookie_name: &str,
    ) -> Option<StaffSession> {
        let candidates = [
            (Self::extract_bearer_token(req), AuthMethod::Bearer),
            (Self::extract_cookie_token(req, cookie_name), AuthMethod::Cookie),
        ];

        for (token, method) in candidates {
            let Some(token) = token else { continue };
            match jwt.validate_session_token(&token) {
                Ok(claims) => {
                    trace!("Staff authentication successful via {:?}", method);
                    return Some(StaffSession {
                        email: claims.sub,
                        expires_at: claims.exp,
                        method,
                    });
                }
                Err(e) => info!("{:?} session validation failed: {}", method, e),
            }
        }

        None
    }
}

impl<S, B> Service<ServiceRequest> for StaffAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let jwt = self.jwt.clone();
        let cookie_name = self.cookie_name.clone();
        let public_paths = self.public_paths.clone();

        Box::pin(async move {
            if req.method() == Method::OPTIONS {
                return Ok(Self::handle_options_request(req));
            }

            // 登录/登出无需会话
            if public_paths.iter().any(|p| p == req.path()) {
                trace!("Auth endpoint accessed - bypassing session check");
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            match Self::authenticate(&jwt, &req, &cookie_name) {
                Some(session) => {
                    req.extensions_mut().insert(session);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                None => Ok(Self::handle_unauthorized(req)),
            }
        })
    }
}
