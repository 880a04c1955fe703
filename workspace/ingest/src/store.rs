use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, Set, TransactionTrait};
use tracing::trace;

use model::entities::{account, document, history_line, journal, party};

use crate::error::Result;
use crate::sink::EntitySink;

/// SeaORM-backed entity sink.
///
/// Inserts are buffered in memory and written inside one transaction per
/// commit checkpoint, so each import phase lands atomically. Documents are
/// flushed before the history lines that reference them.
pub struct DatabaseSink<'a> {
    db: &'a DatabaseConnection,
    pending: PendingBatch,
}

#[derive(Default)]
struct PendingBatch {
    journals: Vec<journal::ActiveModel>,
    accounts: Vec<account::ActiveModel>,
    parties: Vec<party::ActiveModel>,
    documents: Vec<document::ActiveModel>,
    lines: Vec<history_line::ActiveModel>,
}

impl<'a> DatabaseSink<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            pending: PendingBatch::default(),
        }
    }
}

#[async_trait]
impl EntitySink for DatabaseSink<'_> {
    async fn insert_party(&mut self, party: party::Model) -> Result<()> {
        self.pending.parties.push(party::ActiveModel {
            id: Set(party.id),
            name: Set(party.name),
            customer: Set(party.customer),
            supplier: Set(party.supplier),
            category: Set(party.category),
        });
        Ok(())
    }

    async fn insert_account(&mut self, account: account::Model) -> Result<()> {
        self.pending.accounts.push(account::ActiveModel {
            id: Set(account.id),
            header: Set(account.header),
            name: Set(account.name),
            category: Set(account.category),
        });
        Ok(())
    }

    async fn insert_journal(&mut self, journal: journal::Model) -> Result<()> {
        self.pending.journals.push(journal::ActiveModel {
            id: Set(journal.id),
            name: Set(journal.name),
            category: Set(journal.category),
        });
        Ok(())
    }

    async fn insert_document(&mut self, document: document::Model) -> Result<()> {
        self.pending.documents.push(document::ActiveModel {
            id: Set(document.id),
            period_id: Set(document.period_id),
            journal_id: Set(document.journal_id),
            number: Set(document.number),
            dt: Set(document.dt),
            description: Set(document.description),
        });
        Ok(())
    }

    async fn insert_history_line(&mut self, line: history_line::Model) -> Result<()> {
        self.pending.lines.push(history_line::ActiveModel {
            id: Set(line.id),
            document_id: Set(line.document_id),
            account_id: Set(line.account_id),
            party_id: Set(line.party_id),
            debit: Set(line.debit),
            credit: Set(line.credit),
            tallied: Set(line.tallied),
            tally_number: Set(line.tally_number),
        });
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        let batch = std::mem::take(&mut self.pending);
        trace!(
            journals = batch.journals.len(),
            accounts = batch.accounts.len(),
            parties = batch.parties.len(),
            documents = batch.documents.len(),
            lines = batch.lines.len(),
            "committing batch"
        );

        let txn = self.db.begin().await?;
        if !batch.journals.is_empty() {
            journal::Entity::insert_many(batch.journals).exec(&txn).await?;
        }
        if !batch.accounts.is_empty() {
            account::Entity::insert_many(batch.accounts).exec(&txn).await?;
        }
        if !batch.parties.is_empty() {
            party::Entity::insert_many(batch.parties).exec(&txn).await?;
        }
        if !batch.documents.is_empty() {
            document::Entity::insert_many(batch.documents).exec(&txn).await?;
        }
        if !batch.lines.is_empty() {
            history_line::Entity::insert_many(batch.lines).exec(&txn).await?;
        }
        txn.commit().await?;
        Ok(())
    }
}
