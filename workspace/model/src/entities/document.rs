use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

/// One accounting transaction header, shared by all ledger lines that move
/// against it.
///
/// Identity within a run is the natural key (accounting year, journal,
/// document number); the synthetic `id` is assigned sequentially when the
/// key is first encountered, regardless of which ledger-line source saw it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "document")]
pub struct Model {
    /// Synthetic sequential id, 1-based within a run.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Time bucket: `year * 100 + month`.
    pub period_id: i32,
    pub journal_id: String,
    /// Document number within the journal (bob50 `HDOCNO`).
    pub number: String,
    pub dt: NaiveDate,
    /// Free-text description from whichever source created the document.
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::journal::Entity",
        from = "Column::JournalId",
        to = "super::journal::Column::Id"
    )]
    Journal,
    #[sea_orm(has_many = "super::history_line::Entity")]
    HistoryLine,
}

impl Related<super::journal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Journal.def()
    }
}

impl Related<super::history_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HistoryLine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
