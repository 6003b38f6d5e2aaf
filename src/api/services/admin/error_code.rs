//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::PortalError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证错误
/// - 3000-3099: 课程内容错误
/// - 5000-5099: 服务端错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    Conflict = 1009,
    ServiceUnavailable = 1030,

    // 认证错误 2000-2099
    AuthFailed = 2000,
    TokenInvalid = 2002,

    // 课程内容错误 3000-3099
    LocatorUnresolvable = 3003,

    // 服务端错误 5000-5099
    DatabaseError = 5000,
    ConfigError = 5001,
}

impl From<&PortalError> for ErrorCode {
    fn from(err: &PortalError) -> Self {
        match err {
            PortalError::Validation(_) => ErrorCode::BadRequest,
            PortalError::NotFound(_) => ErrorCode::NotFound,
            PortalError::Conflict(_) => ErrorCode::Conflict,
            PortalError::Unauthorized(_) => ErrorCode::AuthFailed,
            PortalError::DatabaseConfig(_)
            | PortalError::DatabaseConnection(_)
            | PortalError::DatabaseOperation(_) => ErrorCode::DatabaseError,
            PortalError::Config(_) => ErrorCode::ConfigError,
            PortalError::FileOperation(_)
            | PortalError::Serialization(_)
            | PortalError::PasswordHash(_) => ErrorCode::InternalServerError,
        }
    }
}
