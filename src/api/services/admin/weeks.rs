//! Admin API 周次管理

use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::{info, trace};

use crate::api::middleware::StaffSession;
use crate::services::CourseService;

use super::helpers::{api_result, created_response, error_from_portal};
use super::types::{CreateWeekPayload, DeleteResponse, UpdateWeekPayload, VisibilityPayload};

/// GET /weeks
pub async fn list_weeks(course: web::Data<Arc<CourseService>>) -> HttpResponse {
    trace!("Admin API: list weeks");
    api_result(course.list_weeks().await)
}

/// POST /weeks
pub async fn create_week(
    session: StaffSession,
    body: web::Json<CreateWeekPayload>,
    course: web::Data<Arc<CourseService>>,
) -> HttpResponse {
    match course.create_week(body.into_inner().into()).await {
        Ok(week) => {
            info!(
                "Admin API: {} created week {} ({})",
                session.email, week.numero, week.id
            );
            created_response(week)
        }
        Err(e) => error_from_portal(&e),
    }
}

/// GET /weeks/{id}
pub async fn get_week(
    path: web::Path<i32>,
    course: web::Data<Arc<CourseService>>,
) -> HttpResponse {
    api_result(course.get_week(path.into_inner()).await)
}

/// PUT /weeks/{id}
pub async fn update_week(
    session: StaffSession,
    path: web::Path<i32>,
    body: web::Json<UpdateWeekPayload>,
    course: web::Data<Arc<CourseService>>,
) -> HttpResponse {
    let id = path.into_inner();
    let result = course.update_week(id, body.into_inner().into()).await;
    if result.is_ok() {
        info!("Admin API: {} updated week {}", session.email, id);
    }
    api_result(result)
}

/// PUT /weeks/{id}/visibility
pub async fn set_visibility(
    session: StaffSession,
    path: web::Path<i32>,
    body: web::Json<VisibilityPayload>,
    course: web::Data<Arc<CourseService>>,
) -> HttpResponse {
    let id = path.into_inner();
    let result = course.set_week_visibility(id, body.habilitada).await;
    if result.is_ok() {
        info!(
            "Admin API: {} set week {} visibility to {}",
            session.email, id, body.habilitada
        );
    }
    api_result(result)
}

/// DELETE /weeks/{id}
pub async fn delete_week(
    session: StaffSession,
    path: web::Path<i32>,
    course: web::Data<Arc<CourseService>>,
) -> HttpResponse {
    let id = path.into_inner();
    let result = course
        .delete_week(id)
        .await
        .map(|_| DeleteResponse { deleted: true });
    if result.is_ok() {
        info!("Admin API: {} deleted week {}", session.email, id);
    }
    api_result(result)
}
