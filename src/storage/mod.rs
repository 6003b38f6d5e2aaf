use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{NewWeek, Resource, ResourceWrite, StaffUser, StorageCounts, Week, WeekChanges};

pub struct StorageFactory;

impl StorageFactory {
    /// 按配置中的 URL 推断后端并完成迁移
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        let storage = SeaOrmStorage::new(config).await?;
        Ok(Arc::new(storage))
    }
}
