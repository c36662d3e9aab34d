pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_directory_tables;
mod m20240601_000002_create_invites_table;
mod m20240615_000003_create_vacation_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_directory_tables::Migration),
            Box::new(m20240601_000002_create_invites_table::Migration),
            Box::new(m20240615_000003_create_vacation_tables::Migration),
        ]
    }
}
