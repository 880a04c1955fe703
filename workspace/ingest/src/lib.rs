//! Reconciliation core: decodes bob50 ledger extracts into canonical
//! entities with deterministic identity and streams them into an entity
//! sink, one committed batch per import phase.

pub mod decode;
pub mod document;
pub mod error;
pub mod import;
pub mod normalize;
pub mod sink;
pub mod source;
pub mod store;

pub use error::{IngestError, Result};
