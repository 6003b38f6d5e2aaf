//! Admin API 类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::{CreateWeekRequest, ResourceRequest, UpdateWeekRequest};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
    #[serde(default, alias = "redirectTo")]
    pub redirect_to: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginResponse {
    pub message: String,
    /// 会话有效期（秒）
    pub expires_in: u64,
    pub redirect_to: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SessionResponse {
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CreateWeekPayload {
    #[serde(default)]
    pub numero: Option<i32>,
    pub titulo: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub habilitada: Option<bool>,
}

impl From<CreateWeekPayload> for CreateWeekRequest {
    fn from(payload: CreateWeekPayload) -> Self {
        Self {
            numero: payload.numero,
            titulo: payload.titulo,
            descripcion: payload.descripcion,
            habilitada: payload.habilitada,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UpdateWeekPayload {
    pub titulo: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub habilitada: Option<bool>,
}

impl From<UpdateWeekPayload> for UpdateWeekRequest {
    fn from(payload: UpdateWeekPayload) -> Self {
        Self {
            titulo: payload.titulo,
            descripcion: payload.descripcion,
            habilitada: payload.habilitada,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VisibilityPayload {
    pub habilitada: bool,
}

/// 资源表单，`locator` 也接受 `github_url` / `drive_url` 字段名
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ResourcePayload {
    pub nombre: String,
    #[serde(alias = "github_url", alias = "drive_url", alias = "url")]
    pub locator: String,
}

impl From<ResourcePayload> for ResourceRequest {
    fn from(payload: ResourcePayload) -> Self {
        Self {
            nombre: payload.nombre,
            locator: payload.locator,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DeleteResponse {
    pub deleted: bool,
}
