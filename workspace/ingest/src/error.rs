use thiserror::Error;

use crate::decode::DecodeError;

/// Error types for the ingest module. Any of these aborts the run; the
/// only intentional skips (year exclusion) never surface as errors.
#[derive(Error, Debug)]
pub enum IngestError {
    /// A record field failed to decode.
    #[error("{file}, record {record}: {source}")]
    Decode {
        file: String,
        record: u64,
        #[source]
        source: DecodeError,
    },

    /// A document natural key resolved to a document whose stored key
    /// fields disagree with it.
    #[error(
        "document key conflict for ({year}, {journal}, {number}): \
         already assigned to document {existing_id}"
    )]
    DocumentConflict {
        year: i32,
        journal: String,
        number: String,
        existing_id: i64,
    },

    /// A source file could not be opened or read.
    #[error("failed to read {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// Error from the entity sink.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Type alias for Result with IngestError
pub type Result<T> = std::result::Result<T, IngestError>;
