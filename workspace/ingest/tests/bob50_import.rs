//! End-to-end import of a small bob50 extract set into an in-memory
//! database: document reuse across the two history sources, the year
//! exclusion filter, and debit/credit normalization.

use std::collections::HashSet;
use std::path::Path;

use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection, EntityTrait, QueryOrder};

use common::{Bob50Config, SourceFile};
use ingest::import::{Bob50Importer, ImportSummary};
use ingest::store::DatabaseSink;
use model::entities::prelude::*;
use model::entities::{document, history_line};

const AC_DBK: &str = "\
DBID,HEADING1,DBTYPE
VEN,Sales journal,SAL
ACH,Purchase journal,PUR
";

const AC_ACCOUN: &str = "\
AID,AISTITLE,LONGHEADING1,ABALANCE
70,1,Revenue header,PL
700000,0,Sales revenue,PL
601000,0,Purchases,PL
";

const AC_COMPAN: &str = "\
CID,CNAME1,CCUSTYPE,CSUPTYPE,CCUSCAT
C001,Acme SA,C,,A
S001,Supplies sprl,,S,B
";

const AC_AHISTO: &str = "\
HYEAR,HMONTH,HDBK,HDOCNO,HDOCDATE,HREM,HID,HCUSSUP,HAMOUNT,HSTATUS,HMATCHNO
2020,1,VEN,9,2020-01-10,Old invoice,700000,,-99.00,,
2024,1,VEN,12,2024-01-15,Invoice 2024/12,700000,C001,-150.00,T,7
2024,13,VEN,13,2024-12-31,Closing entry,601000,,200.00,,
";

const AC_CHISTO: &str = "\
HYEAR,HMONTH,HDBK,HDOCNO,HDOCDATE,HREMINT,HID,HAMOUNT,HSTATUS,HMATCHNO
2020,2,VEN,9,2020-02-10,Old customer invoice,C001,99.00,,
2024,1,VEN,12,2024-01-15,Customer invoice,C001,150.00,,
";

fn write_extracts(dir: &Path) -> Bob50Config {
    let write = |name: &str, contents: &str| {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        SourceFile { file: path }
    };
    Bob50Config {
        exclude_years: HashSet::from([2020]),
        ac_dbk: write("ac_dbk.csv", AC_DBK),
        ac_accoun: write("ac_accoun.csv", AC_ACCOUN),
        ac_compan: write("ac_compan.csv", AC_COMPAN),
        ac_ahisto: write("ac_ahisto.csv", AC_AHISTO),
        ac_chisto: write("ac_chisto.csv", AC_CHISTO),
    }
}

async fn run_import(config: &Bob50Config) -> (DatabaseConnection, ImportSummary) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let mut sink = DatabaseSink::new(&db);
    let summary = Bob50Importer::new(config).run(&mut sink).await.unwrap();
    (db, summary)
}

#[tokio::test]
async fn imports_the_full_extract_set() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_extracts(dir.path());
    let (db, summary) = run_import(&config).await;

    assert_eq!(
        summary,
        ImportSummary {
            journals: 2,
            accounts: 3,
            parties: 2,
            account_lines: 2,
            party_lines: 1,
            excluded: 2,
            documents: 2,
        }
    );

    assert_eq!(Journal::find().all(&db).await.unwrap().len(), 2);
    assert_eq!(Party::find().all(&db).await.unwrap().len(), 2);

    let accounts = Account::find().all(&db).await.unwrap();
    assert_eq!(accounts.len(), 3);
    let header = accounts.iter().find(|a| a.id == "70").unwrap();
    assert!(header.header);
    let posting = accounts.iter().find(|a| a.id == "700000").unwrap();
    assert!(!posting.header);
}

#[tokio::test]
async fn shared_documents_are_created_once_and_reused() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_extracts(dir.path());
    let (db, _) = run_import(&config).await;

    let documents = Document::find()
        .order_by_asc(document::Column::Id)
        .all(&db)
        .await
        .unwrap();
    assert_eq!(documents.len(), 2);

    // Document 1 is (2024, VEN, 12), created by the account-history phase;
    // its description comes from that phase even though the party-history
    // phase saw the same key later.
    assert_eq!(documents[0].id, 1);
    assert_eq!(documents[0].journal_id, "VEN");
    assert_eq!(documents[0].number, "12");
    assert_eq!(documents[0].period_id, 202401);
    assert_eq!(documents[0].description, "Invoice 2024/12");

    // Document 2 carries the clamped closing-entry period.
    assert_eq!(documents[1].id, 2);
    assert_eq!(documents[1].number, "13");
    assert_eq!(documents[1].period_id, 202412);

    let lines = HistoryLine::find()
        .order_by_asc(history_line::Column::Id)
        .all(&db)
        .await
        .unwrap();
    let shared: Vec<_> = lines.iter().filter(|l| l.document_id == 1).collect();
    assert_eq!(shared.len(), 2);
    assert_eq!(shared[0].account_id.as_deref(), Some("700000"));
    assert_eq!(shared[1].party_id.as_deref(), Some("C001"));
    assert_eq!(shared[1].account_id, None);
}

#[tokio::test]
async fn excluded_years_consume_no_identity() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_extracts(dir.path());
    let (db, summary) = run_import(&config).await;

    assert_eq!(summary.excluded, 2);

    // The 2020 records left no trace: no document, no line, and the id
    // sequences show no gap attributable to them.
    let documents = Document::find().all(&db).await.unwrap();
    let document_ids: Vec<i64> = documents.iter().map(|d| d.id).collect();
    assert_eq!(document_ids, vec![1, 2]);
    assert!(documents.iter().all(|d| d.period_id / 100 == 2024));

    let lines = HistoryLine::find()
        .order_by_asc(history_line::Column::Id)
        .all(&db)
        .await
        .unwrap();
    let line_ids: Vec<i64> = lines.iter().map(|l| l.id).collect();
    assert_eq!(line_ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn amounts_are_normalized_into_debit_and_credit() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_extracts(dir.path());
    let (db, _) = run_import(&config).await;

    let lines = HistoryLine::find()
        .order_by_asc(history_line::Column::Id)
        .all(&db)
        .await
        .unwrap();

    // "-150.00", status "T", match "7".
    assert_eq!(lines[0].debit, Decimal::ZERO);
    assert_eq!(lines[0].credit, Decimal::new(15000, 2));
    assert!(lines[0].tallied);
    assert_eq!(lines[0].tally_number, Some(7));

    // "200.00", empty status, empty match.
    assert_eq!(lines[1].debit, Decimal::new(20000, 2));
    assert_eq!(lines[1].credit, Decimal::ZERO);
    assert!(!lines[1].tallied);
    assert_eq!(lines[1].tally_number, None);

    for line in &lines {
        let amount_is_zero = line.debit.is_zero() && line.credit.is_zero();
        let one_sided = line.debit.is_zero() != line.credit.is_zero();
        assert!(amount_is_zero || one_sided);
    }
}
