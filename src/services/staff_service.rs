//! Staff account management and credential checks

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::PortalError;
use crate::storage::{SeaOrmStorage, StaffUser};
use crate::utils::password::{check_new_password, hash_password, verify_password};

use super::validation::{normalize_email, validate_login};

/// 登录失败统一使用的提示，不区分账号不存在和密码错误
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct StaffService {
    storage: Arc<SeaOrmStorage>,
}

impl StaffService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 校验邮箱和密码，成功时返回账号
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<StaffUser, PortalError> {
        let email = validate_login(email, password)?;

        let Some(user) = self.storage.find_staff_by_email(&email).await? else {
            warn!("Login failed: unknown account {}", email);
            return Err(PortalError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(password, &user.password_hash)? {
            warn!("Login failed: wrong password for {}", email);
            return Err(PortalError::unauthorized(INVALID_CREDENTIALS));
        }

        Ok(user)
    }

    pub async fn add_user(&self, email: &str, password: &str) -> Result<StaffUser, PortalError> {
        let email = normalize_email(email)?;
        check_new_password(password).map_err(PortalError::validation)?;

        if self.storage.find_staff_by_email(&email).await?.is_some() {
            return Err(PortalError::conflict(format!(
                "Staff account {} already exists",
                email
            )));
        }

        let hash = hash_password(password)?;
        let user = self.storage.insert_staff(&email, &hash).await?;
        info!("Staff account created: {}", user.email);
        Ok(user)
    }

    pub async fn set_password(&self, email: &str, password: &str) -> Result<(), PortalError> {
        let email = normalize_email(email)?;
        check_new_password(password).map_err(PortalError::validation)?;

        let hash = hash_password(password)?;
        self.storage.update_staff_password(&email, &hash).await?;
        info!("Password updated for {}", email);
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<StaffUser>, PortalError> {
        self.storage.list_staff().await
    }

    pub async fn remove_user(&self, email: &str) -> Result<(), PortalError> {
        let email = normalize_email(email)?;
        self.storage.delete_staff(&email).await?;
        info!("Staff account removed: {}", email);
        Ok(())
    }
}
