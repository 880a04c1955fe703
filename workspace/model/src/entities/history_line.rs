use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// One posted ledger movement attached to a document.
///
/// Exactly one of `debit`/`credit` is nonzero unless the source amount was
/// exactly zero, in which case both are zero.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "history_line")]
pub struct Model {
    /// Synthetic sequential id, 1-based within a run, counted
    /// independently of document ids.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub document_id: i64,
    /// Only set on lines from the account-history source.
    pub account_id: Option<String>,
    /// Set on party-sourced lines, and on account-sourced lines that carry
    /// a counterparty.
    pub party_id: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub debit: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub credit: Decimal,
    /// Whether the line has been matched against an offsetting line.
    pub tallied: bool,
    /// Groups matched line sets.
    pub tally_number: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::document::Entity",
        from = "Column::DocumentId",
        to = "super::document::Column::Id"
    )]
    Document,
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id"
    )]
    Account,
    #[sea_orm(
        belongs_to = "super::party::Entity",
        from = "Column::PartyId",
        to = "super::party::Column::Id"
    )]
    Party,
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Document.def()
    }
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::party::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Party.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
