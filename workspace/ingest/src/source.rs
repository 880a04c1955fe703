//! Typed rows for the bob50 extract set. Column names follow the source
//! schema and are stable per file kind.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::decode::{DecodeError, RawRecord};

/// One row of the company file (`ac_compan`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyRow {
    pub id: String,
    pub name: String,
    pub customer: bool,
    pub supplier: bool,
    pub category: String,
}

impl PartyRow {
    pub fn decode(record: &RawRecord) -> Result<Self, DecodeError> {
        Ok(Self {
            id: record.text("CID")?.to_owned(),
            name: record.text("CNAME1")?.to_owned(),
            customer: record.text("CCUSTYPE")? == "C",
            supplier: record.text("CSUPTYPE")? == "S",
            category: record.text("CCUSCAT")?.to_owned(),
        })
    }
}

/// One row of the chart of accounts (`ac_accoun`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRow {
    pub id: String,
    pub header: bool,
    pub name: String,
    pub category: String,
}

impl AccountRow {
    pub fn decode(record: &RawRecord) -> Result<Self, DecodeError> {
        Ok(Self {
            id: record.text("AID")?.to_owned(),
            header: record.flag("AISTITLE")?,
            name: record.text("LONGHEADING1")?.to_owned(),
            category: record.text("ABALANCE")?.to_owned(),
        })
    }
}

/// One row of the journal list (`ac_dbk`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalRow {
    pub id: String,
    pub name: String,
    pub category: String,
}

impl JournalRow {
    pub fn decode(record: &RawRecord) -> Result<Self, DecodeError> {
        Ok(Self {
            id: record.text("DBID")?.to_owned(),
            name: record.text("HEADING1")?.to_owned(),
            category: record.text("DBTYPE")?.to_owned(),
        })
    }
}

/// Which of the two ledger-line files a row came from. The files share
/// their layout except for the meaning of `HID` and the description column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSource {
    AccountHistory,
    PartyHistory,
}

/// One ledger movement row from `ac_ahisto` or `ac_chisto`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerLineRow {
    pub year: i32,
    pub month: i32,
    pub journal: String,
    pub number: String,
    pub date: NaiveDate,
    pub description: String,
    /// Account id for account-history rows, party id for party-history rows.
    pub entity_id: String,
    /// Counterparty on account-history rows (`HCUSSUP`), when present.
    pub counterparty: Option<String>,
    pub amount: Decimal,
    pub status: String,
    pub match_number: Option<i64>,
}

impl LedgerLineRow {
    pub fn decode(record: &RawRecord, source: LineSource) -> Result<Self, DecodeError> {
        let description_column = match source {
            LineSource::AccountHistory => "HREM",
            LineSource::PartyHistory => "HREMINT",
        };
        let counterparty = match source {
            LineSource::AccountHistory => record.optional_text("HCUSSUP")?.map(str::to_owned),
            LineSource::PartyHistory => None,
        };
        Ok(Self {
            year: record.int("HYEAR")?,
            month: record.int("HMONTH")?,
            journal: record.text("HDBK")?.to_owned(),
            number: record.text("HDOCNO")?.to_owned(),
            date: record.date("HDOCDATE")?,
            description: record.text(description_column)?.to_owned(),
            entity_id: record.text("HID")?.to_owned(),
            counterparty,
            amount: record.decimal("HAMOUNT")?,
            status: record.text("HSTATUS")?.to_owned(),
            match_number: record.optional_int("HMATCHNO")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_party_row() {
        let record = RawRecord::from_pairs(&[
            ("CID", "C001"),
            ("CNAME1", "Acme SA"),
            ("CCUSTYPE", "C"),
            ("CSUPTYPE", ""),
            ("CCUSCAT", "A"),
        ]);
        let row = PartyRow::decode(&record).unwrap();
        assert_eq!(row.id, "C001");
        assert!(row.customer);
        assert!(!row.supplier);
    }

    #[test]
    fn decodes_account_history_row() {
        let record = RawRecord::from_pairs(&[
            ("HYEAR", "2024"),
            ("HMONTH", "1"),
            ("HDBK", "VEN"),
            ("HDOCNO", "12"),
            ("HDOCDATE", "2024-01-15"),
            ("HREM", "Invoice 2024/12"),
            ("HID", "700000"),
            ("HCUSSUP", "C001"),
            ("HAMOUNT", "-150.00"),
            ("HSTATUS", "T"),
            ("HMATCHNO", "7"),
        ]);
        let row = LedgerLineRow::decode(&record, LineSource::AccountHistory).unwrap();
        assert_eq!(row.year, 2024);
        assert_eq!(row.description, "Invoice 2024/12");
        assert_eq!(row.entity_id, "700000");
        assert_eq!(row.counterparty.as_deref(), Some("C001"));
        assert_eq!(row.amount, Decimal::new(-15000, 2));
        assert_eq!(row.match_number, Some(7));
    }

    #[test]
    fn party_history_reads_its_own_description_column() {
        let record = RawRecord::from_pairs(&[
            ("HYEAR", "2024"),
            ("HMONTH", "1"),
            ("HDBK", "VEN"),
            ("HDOCNO", "12"),
            ("HDOCDATE", "2024-01-15"),
            ("HREMINT", "Customer invoice"),
            ("HID", "C001"),
            ("HAMOUNT", "150.00"),
            ("HSTATUS", ""),
            ("HMATCHNO", ""),
        ]);
        let row = LedgerLineRow::decode(&record, LineSource::PartyHistory).unwrap();
        assert_eq!(row.description, "Customer invoice");
        assert_eq!(row.entity_id, "C001");
        assert_eq!(row.counterparty, None);
        assert_eq!(row.match_number, None);
    }
}
