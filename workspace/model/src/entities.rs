//! Root for all SeaORM entity modules of the normalized ledger.
//!
//! The mapping between entities and storage is declared here, in code, and
//! versioned together with the migrations that create the schema -- nothing
//! is discovered from the database at runtime.

pub mod account;
pub mod document;
pub mod history_line;
pub mod journal;
pub mod kpi;
pub mod kpi_datum;
pub mod party;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::account::Entity as Account;
    pub use super::document::Entity as Document;
    pub use super::history_line::Entity as HistoryLine;
    pub use super::journal::Entity as Journal;
    pub use super::kpi::Entity as Kpi;
    pub use super::kpi_datum::Entity as KpiDatum;
    pub use super::party::Entity as Party;
}
