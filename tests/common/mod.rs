//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use course_portal::config::{DatabaseConfig, StaticConfig};
use course_portal::links::LocatorKind;
use course_portal::storage::SeaOrmStorage;
use tempfile::TempDir;

/// 临时 SQLite 存储，TempDir 需与存储同生命周期
pub async fn create_storage() -> (TempDir, Arc<SeaOrmStorage>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("portal_test.db");

    let config = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        ..DatabaseConfig::default()
    };

    let storage = SeaOrmStorage::new(&config)
        .await
        .expect("Failed to create storage");
    (temp_dir, Arc::new(storage))
}

/// 测试用配置：固定 JWT 密钥，Cookie 不强制 Secure
pub fn test_config(kind: LocatorKind) -> StaticConfig {
    let mut config = StaticConfig::default();
    config.portal.locator_kind = Some(kind);
    config.portal.default_weeks = 0;
    config.auth.jwt_secret = "integration_test_secret_32_bytes!".to_string();
    config.auth.cookie_secure = false;
    config
}

pub const PDF_URL: &str = "https://github.com/o/r/blob/main/docs/report.pdf";
pub const DOCX_URL: &str = "https://github.com/o/r/blob/main/notes.docx";
pub const DRIVE_ID: &str = "1AbCdEfGhIjKlMnOpQrStUvWxYz";
