//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::debug;

use super::converters::{model_to_resource, model_to_staff_user, model_to_week};
use super::{SeaOrmStorage, map_db_err, retry};
use crate::errors::Result;
use crate::storage::models::{Resource, StaffUser, StorageCounts, Week};

use migration::entities::{archivo, semana, staff_user};

impl SeaOrmStorage {
    /// 按周序号升序列出，`only_enabled` 时只返回已启用的周
    pub async fn list_weeks(&self, only_enabled: bool) -> Result<Vec<Week>> {
        let db = &self.db;

        let models = retry::with_retry("list_weeks", self.retry_config, || async {
            let mut query = semana::Entity::find();
            if only_enabled {
                query = query.filter(semana::Column::Habilitada.eq(true));
            }
            query.order_by_asc(semana::Column::Numero).all(db).await
        })
        .await
        .map_err(|e| map_db_err("查询周列表失败", e))?;

        Ok(models.into_iter().map(model_to_week).collect())
    }

    pub async fn find_week(&self, id: i32) -> Result<Option<Week>> {
        let db = &self.db;

        let model = retry::with_retry(&format!("find_week({})", id), self.retry_config, || async {
            semana::Entity::find_by_id(id).one(db).await
        })
        .await
        .map_err(|e| map_db_err("查询周失败", e))?;

        Ok(model.map(model_to_week))
    }

    pub async fn find_week_by_numero(&self, numero: i32) -> Result<Option<Week>> {
        let db = &self.db;

        let model = retry::with_retry(
            &format!("find_week_by_numero({})", numero),
            self.retry_config,
            || async {
                semana::Entity::find()
                    .filter(semana::Column::Numero.eq(numero))
                    .one(db)
                    .await
            },
        )
        .await
        .map_err(|e| map_db_err("查询周失败", e))?;

        Ok(model.map(model_to_week))
    }

    /// 当前最大的周序号，没有任何周时为 None
    pub async fn max_week_numero(&self) -> Result<Option<i32>> {
        let db = &self.db;

        let model = retry::with_retry("max_week_numero", self.retry_config, || async {
            semana::Entity::find()
                .order_by_desc(semana::Column::Numero)
                .one(db)
                .await
        })
        .await
        .map_err(|e| map_db_err("查询最大周序号失败", e))?;

        Ok(model.map(|m| m.numero))
    }

    /// 已存在的全部周序号
    pub async fn existing_week_numeros(&self) -> Result<Vec<i32>> {
        Ok(self
            .list_weeks(false)
            .await?
            .into_iter()
            .map(|week| week.numero)
            .collect())
    }

    /// 多个周的资源，按上传时间倒序（同一时间按 id 倒序）
    pub async fn list_resources_for_weeks(&self, week_ids: &[i32]) -> Result<Vec<Resource>> {
        if week_ids.is_empty() {
            return Ok(Vec::new());
        }

        let db = &self.db;
        let ids = week_ids.to_vec();

        let models = retry::with_retry("list_resources_for_weeks", self.retry_config, || {
            let ids = ids.clone();
            async move {
                archivo::Entity::find()
                    .filter(archivo::Column::SemanaId.is_in(ids))
                    .order_by_desc(archivo::Column::FechaSubida)
                    .order_by_desc(archivo::Column::Id)
                    .all(db)
                    .await
            }
        })
        .await
        .map_err(|e| map_db_err("查询资源列表失败", e))?;

        debug!(
            "Loaded {} resources for {} weeks",
            models.len(),
            week_ids.len()
        );
        Ok(models.into_iter().map(model_to_resource).collect())
    }

    pub async fn list_resources(&self, week_id: i32) -> Result<Vec<Resource>> {
        self.list_resources_for_weeks(&[week_id]).await
    }

    pub async fn find_resource(&self, id: i32) -> Result<Option<Resource>> {
        let db = &self.db;

        let model = retry::with_retry(
            &format!("find_resource({})", id),
            self.retry_config,
            || async { archivo::Entity::find_by_id(id).one(db).await },
        )
        .await
        .map_err(|e| map_db_err("查询资源失败", e))?;

        Ok(model.map(model_to_resource))
    }

    /// 仪表盘计数：周数、资源数、最近一次上传时间
    pub async fn counts(&self) -> Result<StorageCounts> {
        let db = &self.db;

        let (semanas, archivos, latest) =
            retry::with_retry("counts", self.retry_config, || async {
                let semanas = semana::Entity::find().count(db).await?;
                let archivos = archivo::Entity::find().count(db).await?;
                let latest = archivo::Entity::find()
                    .order_by_desc(archivo::Column::FechaSubida)
                    .one(db)
                    .await?;
                Ok((semanas, archivos, latest))
            })
            .await
            .map_err(|e| map_db_err("统计查询失败", e))?;

        Ok(StorageCounts {
            semanas,
            archivos,
            ultima_subida: latest.map(|m| m.fecha_subida),
        })
    }

    /// 邮箱按小写存储，查询前由调用方规范化
    pub async fn find_staff_by_email(&self, email: &str) -> Result<Option<StaffUser>> {
        let db = &self.db;
        let email_owned = email.to_string();

        let model = retry::with_retry("find_staff_by_email", self.retry_config, || {
            let email = email_owned.clone();
            async move {
                staff_user::Entity::find()
                    .filter(staff_user::Column::Email.eq(email))
                    .one(db)
                    .await
            }
        })
        .await
        .map_err(|e| map_db_err("查询员工账号失败", e))?;

        Ok(model.map(model_to_staff_user))
    }

    pub async fn list_staff(&self) -> Result<Vec<StaffUser>> {
        let db = &self.db;

        let models = retry::with_retry("list_staff", self.retry_config, || async {
            staff_user::Entity::find()
                .order_by_asc(staff_user::Column::Email)
                .all(db)
                .await
        })
        .await
        .map_err(|e| map_db_err("查询员工账号失败", e))?;

        Ok(models.into_iter().map(model_to_staff_user).collect())
    }
}
