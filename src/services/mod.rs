//! Business logic shared by the HTTP API and the CLI

pub mod course_service;
pub mod staff_service;
pub mod validation;

pub use course_service::{
    CourseService, CreateWeekRequest, DashboardStats, ResourceRequest, ResourceView,
    UpdateWeekRequest, WeekDetail,
};
pub use staff_service::StaffService;
