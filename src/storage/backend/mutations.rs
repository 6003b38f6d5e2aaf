//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};
use tracing::info;

use super::converters::{
    model_to_resource, model_to_staff_user, model_to_week, new_resource_to_active_model,
    new_week_to_active_model, resource_write_to_active_model, week_changes_to_active_model,
};
use super::{SeaOrmStorage, map_db_err, retry};
use crate::errors::{PortalError, Result};
use crate::storage::models::{NewWeek, Resource, ResourceWrite, StaffUser, Week, WeekChanges};

use migration::entities::{archivo, semana, staff_user};

impl SeaOrmStorage {
    pub async fn insert_week(&self, week: &NewWeek) -> Result<Week> {
        let db = &self.db;
        let active = new_week_to_active_model(week);

        let model = retry::with_retry(
            &format!("insert_week({})", week.numero),
            self.retry_config,
            || {
                let active = active.clone();
                async move { active.insert(db).await }
            },
        )
        .await
        .map_err(|e| map_db_err(&format!("创建第 {} 周失败", week.numero), e))?;

        info!("Week created: #{} ({})", model.numero, model.titulo);
        Ok(model_to_week(model))
    }

    pub async fn update_week(&self, id: i32, changes: &WeekChanges) -> Result<Week> {
        let db = &self.db;
        let active = week_changes_to_active_model(id, changes);

        let model = retry::with_retry(&format!("update_week({})", id), self.retry_config, || {
            let active = active.clone();
            async move { active.update(db).await }
        })
        .await
        .map_err(|e| map_db_err(&format!("更新周 {} 失败", id), e))?;

        Ok(model_to_week(model))
    }

    pub async fn set_week_visibility(&self, id: i32, enabled: bool) -> Result<Week> {
        let db = &self.db;
        let active = semana::ActiveModel {
            id: Set(id),
            numero: NotSet,
            titulo: NotSet,
            descripcion: NotSet,
            habilitada: Set(enabled),
            fecha_creacion: NotSet,
        };

        let model = retry::with_retry(
            &format!("set_week_visibility({})", id),
            self.retry_config,
            || {
                let active = active.clone();
                async move { active.update(db).await }
            },
        )
        .await
        .map_err(|e| map_db_err(&format!("更新周 {} 可见性失败", id), e))?;

        info!("Week #{} visibility set to {}", model.numero, enabled);
        Ok(model_to_week(model))
    }

    /// 在同一事务中删除周及其资源，返回删除的资源数
    pub async fn delete_week(&self, id: i32) -> Result<u64> {
        let db = &self.db;

        let (weeks_deleted, resources_deleted) =
            retry::with_retry(&format!("delete_week({})", id), self.retry_config, || async {
                let txn = db.begin().await?;

                let resources = archivo::Entity::delete_many()
                    .filter(archivo::Column::SemanaId.eq(id))
                    .exec(&txn)
                    .await?;
                let weeks = semana::Entity::delete_by_id(id).exec(&txn).await?;

                txn.commit().await?;
                Ok((weeks.rows_affected, resources.rows_affected))
            })
            .await
            .map_err(|e| map_db_err(&format!("删除周 {} 失败", id), e))?;

        if weeks_deleted == 0 {
            return Err(PortalError::not_found(format!("Week {} not found", id)));
        }

        info!(
            "Week {} deleted together with {} resources",
            id, resources_deleted
        );
        Ok(resources_deleted)
    }

    pub async fn insert_resource(&self, week_id: i32, write: &ResourceWrite) -> Result<Resource> {
        let db = &self.db;
        let active = new_resource_to_active_model(week_id, write);

        let model = retry::with_retry(
            &format!("insert_resource(week={})", week_id),
            self.retry_config,
            || {
                let active = active.clone();
                async move { active.insert(db).await }
            },
        )
        .await
        .map_err(|e| map_db_err("创建资源失败", e))?;

        info!("Resource {} added to week {}", model.id, week_id);
        Ok(model_to_resource(model))
    }

    pub async fn update_resource(&self, id: i32, write: &ResourceWrite) -> Result<Resource> {
        let db = &self.db;
        let active = resource_write_to_active_model(id, write);

        let model = retry::with_retry(
            &format!("update_resource({})", id),
            self.retry_config,
            || {
                let active = active.clone();
                async move { active.update(db).await }
            },
        )
        .await
        .map_err(|e| map_db_err(&format!("更新资源 {} 失败", id), e))?;

        Ok(model_to_resource(model))
    }

    pub async fn delete_resource(&self, id: i32) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry(
            &format!("delete_resource({})", id),
            self.retry_config,
            || async { archivo::Entity::delete_by_id(id).exec(db).await },
        )
        .await
        .map_err(|e| map_db_err(&format!("删除资源 {} 失败", id), e))?;

        if result.rows_affected == 0 {
            return Err(PortalError::not_found(format!("Resource {} not found", id)));
        }

        info!("Resource {} deleted", id);
        Ok(())
    }

    pub async fn insert_staff(&self, email: &str, password_hash: &str) -> Result<StaffUser> {
        let db = &self.db;
        let active = staff_user::ActiveModel {
            id: NotSet,
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(Utc::now()),
        };

        let model = retry::with_retry("insert_staff", self.retry_config, || {
            let active = active.clone();
            async move { active.insert(db).await }
        })
        .await
        .map_err(|e| map_db_err(&format!("创建员工账号 {} 失败", email), e))?;

        Ok(model_to_staff_user(model))
    }

    pub async fn update_staff_password(&self, email: &str, password_hash: &str) -> Result<()> {
        let db = &self.db;
        let email_owned = email.to_string();
        let hash_owned = password_hash.to_string();

        let result = retry::with_retry("update_staff_password", self.retry_config, || {
            let email = email_owned.clone();
            let hash = hash_owned.clone();
            async move {
                staff_user::Entity::update_many()
                    .col_expr(
                        staff_user::Column::PasswordHash,
                        sea_orm::sea_query::Expr::value(hash),
                    )
                    .filter(staff_user::Column::Email.eq(email))
                    .exec(db)
                    .await
            }
        })
        .await
        .map_err(|e| map_db_err("更新员工密码失败", e))?;

        if result.rows_affected == 0 {
            return Err(PortalError::not_found(format!(
                "Staff account {} not found",
                email
            )));
        }
        Ok(())
    }

    pub async fn delete_staff(&self, email: &str) -> Result<()> {
        let db = &self.db;
        let email_owned = email.to_string();

        let result = retry::with_retry("delete_staff", self.retry_config, || {
            let email = email_owned.clone();
            async move {
                staff_user::Entity::delete_many()
                    .filter(staff_user::Column::Email.eq(email))
                    .exec(db)
                    .await
            }
        })
        .await
        .map_err(|e| map_db_err("删除员工账号失败", e))?;

        if result.rows_affected == 0 {
            return Err(PortalError::not_found(format!(
                "Staff account {} not found",
                email
            )));
        }
        Ok(())
    }
}
