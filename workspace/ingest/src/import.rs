use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info};

use common::{Bob50Config, IdSequence, period_id};
use model::entities::{account, document, history_line, journal, party};

use crate::decode::{DecodeError, RawRecord};
use crate::document::{DocumentKey, DocumentResolver};
use crate::error::{IngestError, Result};
use crate::normalize::{normalize, should_import};
use crate::sink::EntitySink;
use crate::source::{AccountRow, JournalRow, LedgerLineRow, LineSource, PartyRow};

const YEAR_COLUMN: &str = "HYEAR";

/// Per-phase record counts reported after a successful run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub journals: u64,
    pub accounts: u64,
    pub parties: u64,
    pub account_lines: u64,
    pub party_lines: u64,
    /// Ledger-line records dropped by the year exclusion filter.
    pub excluded: u64,
    pub documents: i64,
}

/// Drives the fixed bob50 phase sequence: journals, accounts, parties,
/// account history, party history.
///
/// Each phase streams one file in source order and ends with a commit
/// checkpoint. Document identity is shared between the two history phases,
/// and account history runs first, so its description wins for shared
/// documents. Any error aborts the run; there is no per-record
/// skip-and-continue.
pub struct Bob50Importer<'a> {
    config: &'a Bob50Config,
    documents: DocumentResolver,
    line_ids: IdSequence,
    excluded_years: HashSet<i32>,
}

impl<'a> Bob50Importer<'a> {
    pub fn new(config: &'a Bob50Config) -> Self {
        debug!("Ignoring accounting years: {:?}", config.exclude_years);
        Self {
            config,
            documents: DocumentResolver::new(),
            line_ids: IdSequence::new(),
            excluded_years: config.exclude_years.clone(),
        }
    }

    pub async fn run<S: EntitySink>(mut self, sink: &mut S) -> Result<ImportSummary> {
        let config = self.config;
        let mut summary = ImportSummary::default();

        summary.journals = self.import_journals(sink, &config.ac_dbk.file).await?;
        summary.accounts = self.import_accounts(sink, &config.ac_accoun.file).await?;
        summary.parties = self.import_parties(sink, &config.ac_compan.file).await?;

        let (imported, excluded) = self
            .import_history(sink, &config.ac_ahisto.file, LineSource::AccountHistory)
            .await?;
        summary.account_lines = imported;
        summary.excluded += excluded;

        let (imported, excluded) = self
            .import_history(sink, &config.ac_chisto.file, LineSource::PartyHistory)
            .await?;
        summary.party_lines = imported;
        summary.excluded += excluded;

        summary.documents = self.documents.created();
        Ok(summary)
    }

    async fn import_journals<S: EntitySink>(&mut self, sink: &mut S, path: &Path) -> Result<u64> {
        let (file, mut reader, headers) = open_source(path)?;
        let mut count = 0u64;
        for result in reader.records() {
            let record = read_record(&file, result)?;
            count += 1;
            let raw = RawRecord::new(&headers, &record);
            let row = JournalRow::decode(&raw).map_err(|source| decode_error(&file, count, source))?;
            sink.insert_journal(journal::Model {
                id: row.id,
                name: row.name,
                category: row.category,
            })
            .await?;
        }
        sink.commit().await?;
        info!("Imported {} journals", count);
        Ok(count)
    }

    async fn import_accounts<S: EntitySink>(&mut self, sink: &mut S, path: &Path) -> Result<u64> {
        let (file, mut reader, headers) = open_source(path)?;
        let mut count = 0u64;
        for result in reader.records() {
            let record = read_record(&file, result)?;
            count += 1;
            let raw = RawRecord::new(&headers, &record);
            let row = AccountRow::decode(&raw).map_err(|source| decode_error(&file, count, source))?;
            sink.insert_account(account::Model {
                id: row.id,
                header: row.header,
                name: row.name,
                category: row.category,
            })
            .await?;
        }
        sink.commit().await?;
        info!("Imported {} accounts", count);
        Ok(count)
    }

    async fn import_parties<S: EntitySink>(&mut self, sink: &mut S, path: &Path) -> Result<u64> {
        let (file, mut reader, headers) = open_source(path)?;
        let mut count = 0u64;
        for result in reader.records() {
            let record = read_record(&file, result)?;
            count += 1;
            let raw = RawRecord::new(&headers, &record);
            let row = PartyRow::decode(&raw).map_err(|source| decode_error(&file, count, source))?;
            sink.insert_party(party::Model {
                id: row.id,
                name: row.name,
                customer: row.customer,
                supplier: row.supplier,
                category: row.category,
            })
            .await?;
        }
        sink.commit().await?;
        info!("Imported {} parties", count);
        Ok(count)
    }

    async fn import_history<S: EntitySink>(
        &mut self,
        sink: &mut S,
        path: &Path,
        source: LineSource,
    ) -> Result<(u64, u64)> {
        let (file, mut reader, headers) = open_source(path)?;
        let mut imported = 0u64;
        let mut excluded = 0u64;
        let mut record_number = 0u64;
        for result in reader.records() {
            let record = read_record(&file, result)?;
            record_number += 1;
            let raw = RawRecord::new(&headers, &record);

            // The exclusion filter runs before the full decode and before
            // any identity is consumed: an excluded record is a no-op.
            let year = raw
                .int(YEAR_COLUMN)
                .map_err(|source| decode_error(&file, record_number, source))?;
            if !should_import(year, &self.excluded_years) {
                excluded += 1;
                continue;
            }

            let row = LedgerLineRow::decode(&raw, source)
                .map_err(|source| decode_error(&file, record_number, source))?;
            self.import_line(sink, row, source).await?;
            imported += 1;
        }
        sink.commit().await?;
        match source {
            LineSource::AccountHistory => {
                info!(
                    "Imported {} account history records ({} excluded)",
                    imported, excluded
                );
            }
            LineSource::PartyHistory => {
                info!(
                    "Imported {} party history records ({} excluded)",
                    imported, excluded
                );
            }
        }
        Ok((imported, excluded))
    }

    async fn import_line<S: EntitySink>(
        &mut self,
        sink: &mut S,
        row: LedgerLineRow,
        source: LineSource,
    ) -> Result<()> {
        let key = DocumentKey {
            year: row.year,
            journal: row.journal.clone(),
            number: row.number.clone(),
        };
        let (document, created) = self.documents.resolve_with(key, |id| document::Model {
            id,
            period_id: period_id(row.year, row.month),
            journal_id: row.journal.clone(),
            number: row.number.clone(),
            dt: row.date,
            description: row.description.clone(),
        })?;
        let document_id = document.id;
        let new_document = created.then(|| document.clone());
        if let Some(document) = new_document {
            sink.insert_document(document).await?;
        }

        let line = normalize(row.amount, &row.status, row.match_number);
        let (account_id, party_id) = match source {
            LineSource::AccountHistory => (Some(row.entity_id), row.counterparty),
            LineSource::PartyHistory => (None, Some(row.entity_id)),
        };
        sink.insert_history_line(history_line::Model {
            id: self.line_ids.next_id(),
            document_id,
            account_id,
            party_id,
            debit: line.debit,
            credit: line.credit,
            tallied: line.tallied,
            tally_number: line.tally_number,
        })
        .await?;
        Ok(())
    }
}

fn open_source(path: &Path) -> Result<(String, csv::Reader<File>, StringRecord)> {
    let file = path.display().to_string();
    let mut reader = csv::Reader::from_path(path).map_err(|source| IngestError::Csv {
        file: file.clone(),
        source,
    })?;
    let headers = reader
        .headers()
        .map_err(|source| IngestError::Csv {
            file: file.clone(),
            source,
        })?
        .clone();
    Ok((file, reader, headers))
}

fn read_record(
    file: &str,
    result: std::result::Result<StringRecord, csv::Error>,
) -> Result<StringRecord> {
    result.map_err(|source| IngestError::Csv {
        file: file.to_owned(),
        source,
    })
}

fn decode_error(file: &str, record: u64, source: DecodeError) -> IngestError {
    IngestError::Decode {
        file: file.to_owned(),
        record,
        source,
    }
}
