//! Course content service
//!
//! Week and resource management shared by the admin API, the public listing
//! and the startup seeding. Every write is validated here before it reaches
//! storage; resource locators are stored only in canonical form.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::PortalError;
use crate::links::{LocatorKind, ResolvedLinks, ResourceLocator};
use crate::storage::{NewWeek, Resource, ResourceWrite, SeaOrmStorage, Week, WeekChanges};

use super::validation::{
    validate_locator, validate_resource_name, validate_week_description, validate_week_number,
    validate_week_title,
};

// ============ Request/Response DTOs ============

/// Request to create a week
#[derive(Debug, Clone, Default)]
pub struct CreateWeekRequest {
    /// Sequence number (optional, defaults to max + 1)
    pub numero: Option<i32>,
    pub titulo: String,
    pub descripcion: Option<String>,
    /// Defaults to disabled
    pub habilitada: Option<bool>,
}

/// Request to update a week
#[derive(Debug, Clone, Default)]
pub struct UpdateWeekRequest {
    pub titulo: String,
    pub descripcion: Option<String>,
    /// None = keep current visibility
    pub habilitada: Option<bool>,
}

/// Request to create or edit a resource
#[derive(Debug, Clone, Default)]
pub struct ResourceRequest {
    pub nombre: String,
    /// Raw user input: sharing URL, bare Drive ID or GitHub file URL
    pub locator: String,
}

/// Resource with its display links
#[derive(Debug, Clone, Serialize)]
pub struct ResourceView {
    pub id: i32,
    pub semana_id: i32,
    pub nombre: String,
    pub locator: String,
    pub fecha_subida: DateTime<Utc>,
    /// None when the stored locator no longer resolves (link-out only)
    pub links: Option<ResolvedLinks>,
}

/// Week with its resources, newest first
#[derive(Debug, Clone, Serialize)]
pub struct WeekDetail {
    #[serde(flatten)]
    pub week: Week,
    pub archivos: Vec<ResourceView>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub semanas: u64,
    pub archivos: u64,
    pub ultima_actualizacion: Option<DateTime<Utc>>,
}

// ============ CourseService Implementation ============

pub struct CourseService {
    storage: Arc<SeaOrmStorage>,
    locator_kind: LocatorKind,
}

impl CourseService {
    pub fn new(storage: Arc<SeaOrmStorage>, locator_kind: LocatorKind) -> Self {
        Self {
            storage,
            locator_kind,
        }
    }

    pub fn locator_kind(&self) -> LocatorKind {
        self.locator_kind
    }

    fn resource_view(&self, resource: Resource) -> ResourceView {
        let links = ResourceLocator::from_stored(self.locator_kind, &resource.locator)
            .map(|locator| locator.links());
        if links.is_none() {
            warn!(
                "Resource {} has a locator that does not resolve as {}: {}",
                resource.id, self.locator_kind, resource.locator
            );
        }

        ResourceView {
            id: resource.id,
            semana_id: resource.semana_id,
            nombre: resource.nombre,
            locator: resource.locator,
            fecha_subida: resource.fecha_subida,
            links,
        }
    }

    /// 把资源挂到对应的周下，保持周的顺序和资源的倒序
    async fn attach_resources(&self, weeks: Vec<Week>) -> Result<Vec<WeekDetail>, PortalError> {
        let ids: Vec<i32> = weeks.iter().map(|w| w.id).collect();
        let resources = self.storage.list_resources_for_weeks(&ids).await?;

        let mut by_week: HashMap<i32, Vec<ResourceView>> = HashMap::new();
        for resource in resources {
            by_week
                .entry(resource.semana_id)
                .or_default()
                .push(self.resource_view(resource));
        }

        Ok(weeks
            .into_iter()
            .map(|week| {
                let archivos = by_week.remove(&week.id).unwrap_or_default();
                WeekDetail { week, archivos }
            })
            .collect())
    }

    async fn require_week(&self, id: i32) -> Result<Week, PortalError> {
        self.storage
            .find_week(id)
            .await?
            .ok_or_else(|| PortalError::not_found(format!("Week {} not found", id)))
    }

    async fn require_resource(&self, week_id: i32, id: i32) -> Result<Resource, PortalError> {
        match self.storage.find_resource(id).await? {
            Some(resource) if resource.semana_id == week_id => Ok(resource),
            _ => Err(PortalError::not_found(format!(
                "Resource {} not found in week {}",
                id, week_id
            ))),
        }
    }

    fn validate_resource(&self, req: &ResourceRequest) -> Result<ResourceWrite, PortalError> {
        let nombre = validate_resource_name(&req.nombre)?;
        let locator = validate_locator(self.locator_kind, &req.locator)?;
        Ok(ResourceWrite {
            nombre,
            locator: locator.canonical(),
        })
    }

    // ============ Weeks ============

    /// All weeks ordered by number
    pub async fn list_weeks(&self) -> Result<Vec<Week>, PortalError> {
        self.storage.list_weeks(false).await
    }

    pub async fn get_week(&self, id: i32) -> Result<WeekDetail, PortalError> {
        let week = self.require_week(id).await?;
        let archivos = self
            .storage
            .list_resources(week.id)
            .await?
            .into_iter()
            .map(|resource| self.resource_view(resource))
            .collect();
        Ok(WeekDetail { week, archivos })
    }

    pub async fn create_week(&self, req: CreateWeekRequest) -> Result<Week, PortalError> {
        let titulo = validate_week_title(&req.titulo)?;
        let descripcion = validate_week_description(req.descripcion.as_deref())?;

        let numero = match req.numero {
            Some(n) => validate_week_number(n)?,
            None => self.storage.max_week_numero().await?.unwrap_or(0) + 1,
        };

        if self.storage.find_week_by_numero(numero).await?.is_some() {
            return Err(PortalError::conflict(format!(
                "Week number {} already exists",
                numero
            )));
        }

        self.storage
            .insert_week(&NewWeek {
                numero,
                titulo,
                descripcion,
                habilitada: req.habilitada.unwrap_or(false),
            })
            .await
    }

    pub async fn update_week(&self, id: i32, req: UpdateWeekRequest) -> Result<Week, PortalError> {
        let titulo = validate_week_title(&req.titulo)?;
        let descripcion = validate_week_description(req.descripcion.as_deref())?;
        let current = self.require_week(id).await?;

        self.storage
            .update_week(
                id,
                &WeekChanges {
                    titulo,
                    descripcion,
                    habilitada: req.habilitada.unwrap_or(current.habilitada),
                },
            )
            .await
    }

    pub async fn set_week_visibility(&self, id: i32, enabled: bool) -> Result<Week, PortalError> {
        self.require_week(id).await?;
        self.storage.set_week_visibility(id, enabled).await
    }

    /// Deletes the week and all of its resources
    pub async fn delete_week(&self, id: i32) -> Result<(), PortalError> {
        let removed = self.storage.delete_week(id).await?;
        info!("CourseService: deleted week {} ({} resources)", id, removed);
        Ok(())
    }

    // ============ Resources ============

    pub async fn create_resource(
        &self,
        week_id: i32,
        req: ResourceRequest,
    ) -> Result<ResourceView, PortalError> {
        let write = self.validate_resource(&req)?;
        self.require_week(week_id).await?;

        let resource = self.storage.insert_resource(week_id, &write).await?;
        Ok(self.resource_view(resource))
    }

    pub async fn update_resource(
        &self,
        week_id: i32,
        id: i32,
        req: ResourceRequest,
    ) -> Result<ResourceView, PortalError> {
        let write = self.validate_resource(&req)?;
        self.require_resource(week_id, id).await?;

        let resource = self.storage.update_resource(id, &write).await?;
        Ok(self.resource_view(resource))
    }

    pub async fn delete_resource(&self, week_id: i32, id: i32) -> Result<(), PortalError> {
        self.require_resource(week_id, id).await?;
        self.storage.delete_resource(id).await
    }

    // ============ Listing & stats ============

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, PortalError> {
        let counts = self.storage.counts().await?;
        Ok(DashboardStats {
            semanas: counts.semanas,
            archivos: counts.archivos,
            ultima_actualizacion: counts.ultima_subida,
        })
    }

    /// Enabled weeks only, each with its resolved resources
    pub async fn public_weeks(&self) -> Result<Vec<WeekDetail>, PortalError> {
        let weeks = self.storage.list_weeks(true).await?;
        self.attach_resources(weeks).await
    }

    /// Resolve one locator under the deployment's kind
    pub fn resolve(&self, input: &str) -> Option<ResolvedLinks> {
        ResourceLocator::parse(self.locator_kind, input).map(|locator| locator.links())
    }

    /// Inserts `Semana N` (disabled) for every missing number in `1..=count`.
    /// Returns how many weeks were created.
    pub async fn ensure_default_weeks(&self, count: u32) -> Result<usize, PortalError> {
        if count == 0 {
            return Ok(0);
        }
        let count = i32::try_from(count).map_err(|_| {
            PortalError::config(format!(
                "portal.default_weeks must be at most {}, got {}",
                i32::MAX,
                count
            ))
        })?;

        let existing: HashSet<i32> = self
            .storage
            .existing_week_numeros()
            .await?
            .into_iter()
            .collect();

        let mut created = 0;
        for numero in 1..=count {
            if existing.contains(&numero) {
                continue;
            }
            self.storage
                .insert_week(&NewWeek {
                    numero,
                    titulo: format!("Semana {}", numero),
                    descripcion: None,
                    habilitada: false,
                })
                .await?;
            created += 1;
        }

        if created > 0 {
            info!("Seeded {} default weeks", created);
        }
        Ok(created)
    }
}
