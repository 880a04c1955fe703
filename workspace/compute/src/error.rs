use thiserror::Error;

/// Error types for the KPI layer. Any of these aborts the KPI phase and
/// the run; the configured skip of a disabled indicator is not an error.
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A definition names a configuration parameter the run configuration
    /// does not supply.
    #[error("KPI '{kpi}' requires parameter '{parameter}'")]
    MissingParameter { kpi: String, parameter: &'static str },

    /// The dependency graph over the catalog cannot be ordered.
    #[error("KPI dependency cycle involving '{0}'")]
    DependencyCycle(String),

    /// A definition depends on an indicator that is not in the catalog.
    #[error("KPI '{kpi}' depends on unknown KPI '{dependency}'")]
    UnknownDependency { kpi: String, dependency: String },
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
