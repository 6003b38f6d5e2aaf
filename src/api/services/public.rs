//! 公开 API：学生端周次列表和单个链接解析

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use std::sync::Arc;
use tracing::trace;

use crate::api::constants::PUBLIC_PREFIX;
use crate::api::services::admin::{ErrorCode, api_result, error_response, success_response};
use crate::services::CourseService;

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub url: String,
}

/// GET /weeks：只返回已启用的周次
pub async fn public_weeks(course: web::Data<Arc<CourseService>>) -> HttpResponse {
    trace!("Public API: list enabled weeks");
    api_result(course.public_weeks().await)
}

/// GET /resolve?url=：预览对话框用
pub async fn resolve(
    query: web::Query<ResolveQuery>,
    course: web::Data<Arc<CourseService>>,
) -> HttpResponse {
    match course.resolve(&query.url) {
        Some(links) => success_response(links),
        None => error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::LocatorUnresolvable,
            &format!("Cannot resolve {} link", course.locator_kind()),
        ),
    }
}

/// 公开路由 `/api/public`
pub fn public_routes() -> actix_web::Scope {
    web::scope(PUBLIC_PREFIX)
        .route("/weeks", web::get().to(public_weeks))
        .route("/resolve", web::get().to(resolve))
}
