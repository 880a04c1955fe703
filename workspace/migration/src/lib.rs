pub use sea_orm_migration::prelude::*;

mod m20260115_000001_create_ledger_tables;
mod m20260115_000002_create_ledger_views;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260115_000001_create_ledger_tables::Migration),
            Box::new(m20260115_000002_create_ledger_views::Migration),
        ]
    }
}
