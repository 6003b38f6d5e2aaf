use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};

use crate::storage::models::{NewWeek, Resource, ResourceWrite, StaffUser, Week, WeekChanges};
use migration::entities::{archivo, semana, staff_user};

pub fn model_to_week(model: semana::Model) -> Week {
    Week {
        id: model.id,
        numero: model.numero,
        titulo: model.titulo,
        descripcion: model.descripcion,
        habilitada: model.habilitada,
        fecha_creacion: model.fecha_creacion,
    }
}

pub fn model_to_resource(model: archivo::Model) -> Resource {
    Resource {
        id: model.id,
        semana_id: model.semana_id,
        nombre: model.nombre,
        locator: model.locator,
        fecha_subida: model.fecha_subida,
    }
}

pub fn model_to_staff_user(model: staff_user::Model) -> StaffUser {
    StaffUser {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
    }
}

/// 新建周，创建时间在这里赋值
pub fn new_week_to_active_model(week: &NewWeek) -> semana::ActiveModel {
    semana::ActiveModel {
        id: NotSet,
        numero: Set(week.numero),
        titulo: Set(week.titulo.clone()),
        descripcion: Set(week.descripcion.clone()),
        habilitada: Set(week.habilitada),
        fecha_creacion: Set(Utc::now()),
    }
}

/// 更新周，`numero` 与创建时间不变
pub fn week_changes_to_active_model(id: i32, changes: &WeekChanges) -> semana::ActiveModel {
    semana::ActiveModel {
        id: Set(id),
        numero: NotSet,
        titulo: Set(changes.titulo.clone()),
        descripcion: Set(changes.descripcion.clone()),
        habilitada: Set(changes.habilitada),
        fecha_creacion: NotSet,
    }
}

pub fn new_resource_to_active_model(semana_id: i32, write: &ResourceWrite) -> archivo::ActiveModel {
    archivo::ActiveModel {
        id: NotSet,
        semana_id: Set(semana_id),
        nombre: Set(write.nombre.clone()),
        locator: Set(write.locator.clone()),
        fecha_subida: Set(Utc::now()),
    }
}

/// 编辑资源不刷新上传时间
pub fn resource_write_to_active_model(id: i32, write: &ResourceWrite) -> archivo::ActiveModel {
    archivo::ActiveModel {
        id: Set(id),
        semana_id: NotSet,
        nombre: Set(write.nombre.clone()),
        locator: Set(write.locator.clone()),
        fecha_subida: NotSet,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    #[test]
    fn test_model_to_week() {
        let now = Utc::now();
        let week = model_to_week(semana::Model {
            id: 7,
            numero: 3,
            titulo: "Semana 3".to_string(),
            descripcion: None,
            habilitada: true,
            fecha_creacion: now,
        });

        assert_eq!(week.id, 7);
        assert_eq!(week.numero, 3);
        assert!(week.habilitada);
        assert_eq!(week.fecha_creacion, now);
    }

    #[test]
    fn test_new_week_leaves_id_unset() {
        let active = new_week_to_active_model(&NewWeek {
            numero: 1,
            titulo: "Intro".to_string(),
            descripcion: Some("Primera semana del curso".to_string()),
            habilitada: false,
        });

        assert!(matches!(active.id, ActiveValue::NotSet));
        assert!(matches!(active.numero, ActiveValue::Set(1)));
        assert!(matches!(active.fecha_creacion, ActiveValue::Set(_)));
    }

    #[test]
    fn test_week_changes_keep_numero() {
        let active = week_changes_to_active_model(
            5,
            &WeekChanges {
                titulo: "Nuevo".to_string(),
                descripcion: None,
                habilitada: true,
            },
        );

        assert!(matches!(active.id, ActiveValue::Set(5)));
        assert!(matches!(active.numero, ActiveValue::NotSet));
        assert!(matches!(active.fecha_creacion, ActiveValue::NotSet));
        assert!(matches!(active.habilitada, ActiveValue::Set(true)));
    }

    #[test]
    fn test_resource_update_keeps_upload_time() {
        let write = ResourceWrite {
            nombre: "Guía".to_string(),
            locator: "abc".to_string(),
        };
        let created = new_resource_to_active_model(2, &write);
        let updated = resource_write_to_active_model(9, &write);

        assert!(matches!(created.fecha_subida, ActiveValue::Set(_)));
        assert!(matches!(created.semana_id, ActiveValue::Set(2)));
        assert!(matches!(updated.fecha_subida, ActiveValue::NotSet));
        assert!(matches!(updated.semana_id, ActiveValue::NotSet));
    }
}
