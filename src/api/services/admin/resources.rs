//! Admin API 资源管理（挂在周次下）

use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::info;

use crate::api::middleware::StaffSession;
use crate::services::CourseService;

use super::helpers::{api_result, created_response, error_from_portal};
use super::types::{DeleteResponse, ResourcePayload};

/// POST /weeks/{id}/resources
pub async fn create_resource(
    session: StaffSession,
    path: web::Path<i32>,
    body: web::Json<ResourcePayload>,
    course: web::Data<Arc<CourseService>>,
) -> HttpResponse {
    let week_id = path.into_inner();
    match course.create_resource(week_id, body.into_inner().into()).await {
        Ok(view) => {
            info!(
                "Admin API: {} added resource {} to week {}",
                session.email, view.id, week_id
            );
            created_response(view)
        }
        Err(e) => error_from_portal(&e),
    }
}

/// PUT /weeks/{id}/resources/{rid}
pub async fn update_resource(
    session: StaffSession,
    path: web::Path<(i32, i32)>,
    body: web::Json<ResourcePayload>,
    course: web::Data<Arc<CourseService>>,
) -> HttpResponse {
    let (week_id, id) = path.into_inner();
    let result = course
        .update_resource(week_id, id, body.into_inner().into())
        .await;
    if result.is_ok() {
        info!(
            "Admin API: {} updated resource {} in week {}",
            session.email, id, week_id
        );
    }
    api_result(result)
}

/// DELETE /weeks/{id}/resources/{rid}
pub async fn delete_resource(
    session: StaffSession,
    path: web::Path<(i32, i32)>,
    course: web::Data<Arc<CourseService>>,
) -> HttpResponse {
    let (week_id, id) = path.into_inner();
    let result = course
        .delete_resource(week_id, id)
        .await
        .map(|_| DeleteResponse { deleted: true });
    if result.is_ok() {
        info!(
            "Admin API: {} deleted resource {} from week {}",
            session.email, id, week_id
        );
    }
    api_result(result)
}
