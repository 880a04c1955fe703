use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use common::ImportConfig;

/// Loads the operator-supplied YAML run configuration.
pub fn load_config(path: &Path) -> Result<ImportConfig> {
    debug!("Parsing config file: {}", path.display());
    let file = File::open(path)
        .with_context(|| format!("Failed to open config file: {}", path.display()))?;
    let config: ImportConfig =
        serde_yaml::from_reader(file).context("Failed to parse config file")?;
    Ok(config)
}

/// The database URL to connect to: `DATABASE_URL` from the environment (or
/// a `.env` file) when set, otherwise the config file's connection string.
pub fn resolve_database_url(config: &ImportConfig) -> String {
    dotenvy::dotenv().ok();
    std::env::var("DATABASE_URL").unwrap_or_else(|_| config.model.connection.clone())
}
