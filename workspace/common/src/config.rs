use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use serde::Deserialize;

/// Run configuration, deserialized from the operator-supplied YAML file.
/// The importer only consumes this; it never writes it back.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// Which source system the extract set comes from.
    pub source: SourceSystem,
    pub model: ModelConfig,
    pub bob50: Bob50Config,
    /// Per-KPI settings keyed by indicator id. An indicator missing from
    /// this map, or present with `enable: false`, is skipped entirely.
    #[serde(default)]
    pub kpi: BTreeMap<String, KpiSettings>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSystem {
    Bob50,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Database URL, e.g. `sqlite://ledger.db` or `postgresql://...`.
    pub connection: String,
}

/// File locations and import policy for a bob50 extract set.
#[derive(Debug, Clone, Deserialize)]
pub struct Bob50Config {
    /// Accounting years dropped before any identity is assigned.
    #[serde(default)]
    pub exclude_years: HashSet<i32>,
    /// Parties (customers and suppliers).
    pub ac_compan: SourceFile,
    /// Chart of accounts.
    pub ac_accoun: SourceFile,
    /// Journal list.
    pub ac_dbk: SourceFile,
    /// Account-side ledger lines.
    pub ac_ahisto: SourceFile,
    /// Party-side ledger lines.
    pub ac_chisto: SourceFile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceFile {
    pub file: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KpiSettings {
    pub enable: Option<bool>,
    pub account_filter: Option<AccountFilter>,
    pub account_filter_assets: Option<AccountFilter>,
    pub account_filter_liabilities: Option<AccountFilter>,
}

impl KpiSettings {
    /// Enabled unless switched off explicitly.
    pub fn enabled(&self) -> bool {
        self.enable.unwrap_or(true)
    }
}

/// Structured account selection for aggregate queries. The values are bound
/// as query parameters, never spliced into SQL text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AccountFilter {
    /// Account-code prefixes, e.g. `"60"` for every 60xxxx account.
    #[serde(default)]
    pub prefixes: Vec<String>,
    /// Exact account ids.
    #[serde(default)]
    pub accounts: Vec<String>,
}

impl AccountFilter {
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
source: bob50
model:
  connection: sqlite://ledger.db
bob50:
  exclude_years: [2019, 2020]
  ac_compan: { file: data/ac_compan.csv }
  ac_accoun: { file: data/ac_accoun.csv }
  ac_dbk: { file: data/ac_dbk.csv }
  ac_ahisto: { file: data/ac_ahisto.csv }
  ac_chisto: { file: data/ac_chisto.csv }
kpi:
  financial.cost.total:
    account_filter:
      prefixes: ["6"]
  financial.revenue.other:
    enable: false
    account_filter:
      accounts: ["743000"]
"#;

    #[test]
    fn parses_full_config() {
        let config: ImportConfig = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(config.source, SourceSystem::Bob50);
        assert_eq!(config.model.connection, "sqlite://ledger.db");
        assert!(config.bob50.exclude_years.contains(&2020));
        assert_eq!(
            config.bob50.ac_ahisto.file,
            PathBuf::from("data/ac_ahisto.csv")
        );

        let cost = &config.kpi["financial.cost.total"];
        assert!(cost.enabled());
        assert_eq!(
            cost.account_filter.as_ref().unwrap().prefixes,
            vec!["6".to_string()]
        );

        let other = &config.kpi["financial.revenue.other"];
        assert!(!other.enabled());
    }

    #[test]
    fn kpi_section_defaults_to_empty() {
        let minimal = r#"
source: bob50
model: { connection: "sqlite::memory:" }
bob50:
  ac_compan: { file: a.csv }
  ac_accoun: { file: b.csv }
  ac_dbk: { file: c.csv }
  ac_ahisto: { file: d.csv }
  ac_chisto: { file: e.csv }
"#;
        let config: ImportConfig = serde_yaml::from_str(minimal).unwrap();
        assert!(config.kpi.is_empty());
        assert!(config.bob50.exclude_years.is_empty());
    }
}
