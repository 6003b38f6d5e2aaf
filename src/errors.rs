use std::fmt;

use crate::utils::password::PasswordError;

#[derive(Debug, Clone)]
pub enum PortalError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Config(String),
    FileOperation(String),
    Serialization(String),
    PasswordHash(String),
}

impl PortalError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            PortalError::DatabaseConfig(_) => "E001",
            PortalError::DatabaseConnection(_) => "E002",
            PortalError::DatabaseOperation(_) => "E003",
            PortalError::Validation(_) => "E004",
            PortalError::NotFound(_) => "E005",
            PortalError::Conflict(_) => "E006",
            PortalError::Unauthorized(_) => "E007",
            PortalError::Config(_) => "E008",
            PortalError::FileOperation(_) => "E009",
            PortalError::Serialization(_) => "E010",
            PortalError::PasswordHash(_) => "E011",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            PortalError::DatabaseConfig(_) => "Database Configuration Error",
            PortalError::DatabaseConnection(_) => "Database Connection Error",
            PortalError::DatabaseOperation(_) => "Database Operation Error",
            PortalError::Validation(_) => "Validation Error",
            PortalError::NotFound(_) => "Resource Not Found",
            PortalError::Conflict(_) => "Conflict",
            PortalError::Unauthorized(_) => "Unauthorized",
            PortalError::Config(_) => "Configuration Error",
            PortalError::FileOperation(_) => "File Operation Error",
            PortalError::Serialization(_) => "Serialization Error",
            PortalError::PasswordHash(_) => "Password Hash Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            PortalError::DatabaseConfig(msg)
            | PortalError::DatabaseConnection(msg)
            | PortalError::DatabaseOperation(msg)
            | PortalError::Validation(msg)
            | PortalError::NotFound(msg)
            | PortalError::Conflict(msg)
            | PortalError::Unauthorized(msg)
            | PortalError::Config(msg)
            | PortalError::FileOperation(msg)
            | PortalError::Serialization(msg)
            | PortalError::PasswordHash(msg) => msg,
        }
    }

    /// 对应的 HTTP 状态码
    pub fn http_status(&self) -> u16 {
        match self {
            PortalError::Validation(_) => 400,
            PortalError::Unauthorized(_) => 401,
            PortalError::NotFound(_) => 404,
            PortalError::Conflict(_) => 409,
            _ => 500,
        }
    }

    /// 格式化为彩色输出（用于启动失败）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortalError {}

// 便捷的构造函数
impl PortalError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        PortalError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        PortalError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        PortalError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        PortalError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        PortalError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        PortalError::Conflict(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        PortalError::Unauthorized(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        PortalError::Config(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        PortalError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        PortalError::Serialization(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        PortalError::PasswordHash(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PortalError {
    fn from(err: sea_orm::DbErr) -> Self {
        PortalError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        PortalError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl From<PasswordError> for PortalError {
    fn from(err: PasswordError) -> Self {
        PortalError::PasswordHash(err.to_string())
    }
}

impl From<config::ConfigError> for PortalError {
    fn from(err: config::ConfigError) -> Self {
        PortalError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;
