//! API 模块常量定义
//!
//! 包含路由前缀、会话 Cookie 等硬编码常量。

/// 会话 Cookie 默认名称
pub const SESSION_COOKIE_NAME: &str = "cp_session";

/// 管理 API 前缀
pub const ADMIN_PREFIX: &str = "/api/admin";

/// 公开 API 前缀
pub const PUBLIC_PREFIX: &str = "/api/public";

/// 健康检查前缀
pub const HEALTH_PREFIX: &str = "/health";

/// JWT token_type 声明值
pub const SESSION_TOKEN_TYPE: &str = "session";

/// 请求体大小上限
pub const MAX_PAYLOAD_BYTES: usize = 64 * 1024;
