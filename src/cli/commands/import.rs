use std::path::Path;

use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tracing::{debug, info};

use common::SourceSystem;
use compute::scheduler::KpiScheduler;
use compute::store::{DatabaseKpiStore, DatabaseLedger};
use ingest::import::Bob50Importer;
use ingest::store::DatabaseSink;

use crate::config::{load_config, resolve_database_url};

/// Runs one full import: schema bootstrap, the five reconciliation phases
/// (each committed separately), then the KPI phase against the committed
/// ledger.
pub async fn import(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let database_url = resolve_database_url(&config);

    info!("Connecting to database");
    debug!("Database URL: {}", database_url);
    let db = Database::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("Failed to initialise database schema")?;

    let summary = match config.source {
        SourceSystem::Bob50 => {
            info!("Importing bob50 ledger extracts");
            let mut sink = DatabaseSink::new(&db);
            Bob50Importer::new(&config.bob50).run(&mut sink).await?
        }
    };
    info!(
        "Ledger import complete: {} journals, {} accounts, {} parties, \
         {} account lines, {} party lines, {} documents ({} records excluded by year)",
        summary.journals,
        summary.accounts,
        summary.parties,
        summary.account_lines,
        summary.party_lines,
        summary.documents,
        summary.excluded
    );

    let ledger = DatabaseLedger::new(&db);
    let mut store = DatabaseKpiStore::new(&db);
    let written = KpiScheduler::new(&config.kpi).run(&ledger, &mut store).await?;
    info!("KPI calculation complete: {} data points", written);

    Ok(())
}
