use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::jwt::JwtService;
use crate::api::services::admin::CookieBuilder;
use crate::config::StaticConfig;
use crate::services::{CourseService, StaffService};
use crate::storage::{SeaOrmStorage, StorageFactory};

/// 服务启动所需的共享组件，构建一次后通过 `web::Data` 注入
#[derive(Clone)]
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub course_service: Arc<CourseService>,
    pub staff_service: Arc<StaffService>,
    pub jwt_service: Arc<JwtService>,
    pub cookie_builder: CookieBuilder,
    pub trusted_proxies: Vec<String>,
}

impl StartupContext {
    /// 用已有的存储组装服务（测试中直接传入临时数据库）
    pub fn from_parts(config: &StaticConfig, storage: Arc<SeaOrmStorage>) -> Result<Self> {
        let locator_kind = config.locator_kind()?;

        Ok(Self {
            course_service: Arc::new(CourseService::new(storage.clone(), locator_kind)),
            staff_service: Arc::new(StaffService::new(storage.clone())),
            jwt_service: Arc::new(JwtService::from_config(&config.auth)),
            cookie_builder: CookieBuilder::from_config(&config.auth),
            trusted_proxies: config.server.trusted_proxies.clone(),
            storage,
        })
    }
}

/// 准备服务器启动的上下文：连接数据库、执行迁移、补齐默认周次
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    config.validate().context("Invalid configuration")?;

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to initialize storage")?;
    info!("Using storage backend: {}", storage.backend_name());

    let context = StartupContext::from_parts(config, storage)?;
    info!(
        "Resource locators are interpreted as {}",
        context.course_service.locator_kind()
    );

    let created = context
        .course_service
        .ensure_default_weeks(config.portal.default_weeks)
        .await
        .context("Failed to seed default weeks")?;
    if created > 0 {
        info!("Created {} default weeks", created);
    }

    if context.staff_service.list_users().await?.is_empty() {
        warn!(
            "No staff accounts exist. Create one with `course-portal user add <email>` \
             before signing in."
        );
    }

    debug!("Pre-startup completed in {:?}", start_time.elapsed());
    Ok(context)
}
