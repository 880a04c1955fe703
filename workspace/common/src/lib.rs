//! Shared leaf types for the importer: period encoding, safe arithmetic,
//! scoped id sequences, and the run configuration model consumed by the
//! ingest and KPI layers.

mod config;
mod ids;
mod math;
mod period;

pub use config::{
    AccountFilter, Bob50Config, ImportConfig, KpiSettings, ModelConfig, SourceFile, SourceSystem,
};
pub use ids::IdSequence;
pub use math::safe_divide;
pub use period::period_id;
