use async_trait::async_trait;

use model::entities::{account, document, history_line, journal, party};

use crate::error::Result;

/// Durable storage for canonical ledger entities.
///
/// Implementations batch inserts between commit checkpoints; the importer
/// issues one checkpoint per import phase, so a failure partway through a
/// run leaves earlier phases durably committed.
#[async_trait]
pub trait EntitySink {
    async fn insert_party(&mut self, party: party::Model) -> Result<()>;
    async fn insert_account(&mut self, account: account::Model) -> Result<()>;
    async fn insert_journal(&mut self, journal: journal::Model) -> Result<()>;
    async fn insert_document(&mut self, document: document::Model) -> Result<()>;
    async fn insert_history_line(&mut self, line: history_line::Model) -> Result<()>;

    /// Makes everything inserted since the previous checkpoint durable.
    async fn commit(&mut self) -> Result<()>;
}
