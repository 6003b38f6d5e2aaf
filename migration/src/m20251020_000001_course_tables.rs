use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 semanas 表
        manager
            .create_table(
                Table::create()
                    .table(Semana::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Semana::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Semana::Numero)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Semana::Titulo).string().not_null())
                    .col(ColumnDef::new(Semana::Descripcion).text().null())
                    .col(
                        ColumnDef::new(Semana::Habilitada)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Semana::FechaCreacion)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 archivos 表，删除周时级联删除
        manager
            .create_table(
                Table::create()
                    .table(Archivo::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Archivo::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Archivo::SemanaId).integer().not_null())
                    .col(ColumnDef::new(Archivo::Nombre).string().not_null())
                    .col(ColumnDef::new(Archivo::Locator).text().not_null())
                    .col(
                        ColumnDef::new(Archivo::FechaSubida)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_archivos_semana_id")
                            .from(Archivo::Table, Archivo::SemanaId)
                            .to(Semana::Table, Semana::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_archivos_semana_id")
                    .table(Archivo::Table)
                    .col(Archivo::SemanaId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_archivos_fecha_subida")
                    .table(Archivo::Table)
                    .col(Archivo::FechaSubida)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_archivos_fecha_subida").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_archivos_semana_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Archivo::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Semana::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Semana {
    #[sea_orm(iden = "semanas")]
    Table,
    Id,
    Numero,
    Titulo,
    Descripcion,
    Habilitada,
    FechaCreacion,
}

#[derive(DeriveIden)]
enum Archivo {
    #[sea_orm(iden = "archivos")]
    Table,
    Id,
    SemanaId,
    Nombre,
    Locator,
    FechaSubida,
}
