//! HTTP API：中间件、路由与会话签发

pub mod constants;
pub mod jwt;
pub mod middleware;
pub mod services;
