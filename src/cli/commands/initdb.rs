use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::{debug, info};

/// Creates or upgrades the ledger schema: tables and the read-only views
/// the KPI layer aggregates over.
pub async fn init_database(database_url: &str) -> Result<()> {
    info!("Initialising database");
    debug!("Database URL: {}", database_url);

    let db: DatabaseConnection = Database::connect(database_url).await?;
    Migrator::up(&db, None).await?;

    info!("Database schema is up to date");
    Ok(())
}
