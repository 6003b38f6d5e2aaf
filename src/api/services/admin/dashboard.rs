use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::services::CourseService;

use super::helpers::api_result;

/// GET /dashboard
pub async fn dashboard(course: web::Data<Arc<CourseService>>) -> HttpResponse {
    api_result(course.dashboard_stats().await)
}
