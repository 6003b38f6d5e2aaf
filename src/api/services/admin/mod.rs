//! Admin API 服务模块
//!
//! 该模块包含教职员管理 API 的所有端点：
//! - 认证（登录、登出、会话）
//! - 周次 CRUD 与可见性切换
//! - 周次下的资源 CRUD
//! - 仪表盘统计

pub mod auth;
mod dashboard;
pub mod error_code;
mod helpers;
mod resources;
pub mod routes;
mod types;
mod weeks;

pub use types::*;

pub use helpers::{
    CookieBuilder, api_result, created_response, error_from_portal, error_response,
    json_response, success_response,
};

pub use error_code::ErrorCode;

pub use routes::admin_routes;
