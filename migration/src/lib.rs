pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20251020_000001_course_tables;
mod m20251104_000001_staff_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251020_000001_course_tables::Migration),
            Box::new(m20251104_000001_staff_users::Migration),
        ]
    }
}
