use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 课程周
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Week {
    pub id: i32,
    pub numero: i32,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub habilitada: bool,
    pub fecha_creacion: DateTime<Utc>,
}

/// 周下挂载的资源，`locator` 为规范形式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i32,
    pub semana_id: i32,
    pub nombre: String,
    pub locator: String,
    pub fecha_subida: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffUser {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// 新建周（已校验）
#[derive(Debug, Clone)]
pub struct NewWeek {
    pub numero: i32,
    pub titulo: String,
    pub descripcion: Option<String>,
    pub habilitada: bool,
}

/// 周的可变字段（已校验）
#[derive(Debug, Clone)]
pub struct WeekChanges {
    pub titulo: String,
    pub descripcion: Option<String>,
    pub habilitada: bool,
}

/// 资源写入（已校验，locator 已规范化）
#[derive(Debug, Clone)]
pub struct ResourceWrite {
    pub nombre: String,
    pub locator: String,
}

/// 聚合计数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StorageCounts {
    pub semanas: u64,
    pub archivos: u64,
    pub ultima_subida: Option<DateTime<Utc>>,
}
