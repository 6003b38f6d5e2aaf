//! 资源（文件链接）实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "archivos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub semana_id: i32,
    pub nombre: String,
    /// Canonical locator: Drive file ID or GitHub `blob` URL
    #[sea_orm(column_type = "Text")]
    pub locator: String,
    pub fecha_subida: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::semana::Entity",
        from = "Column::SemanaId",
        to = "super::semana::Column::Id",
        on_delete = "Cascade"
    )]
    Semana,
}

impl Related<super::semana::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Semana.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
