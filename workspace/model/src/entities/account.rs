use sea_orm::entity::prelude::*;

/// One general-ledger account from the source chart of accounts.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "account")]
pub struct Model {
    /// Natural key from the source (bob50 `AID`).
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// True for grouping/summary headers that never carry movements.
    pub header: bool,
    pub name: String,
    /// Balance-sheet classification (bob50 `ABALANCE`).
    pub category: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::history_line::Entity")]
    HistoryLine,
}

impl Related<super::history_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HistoryLine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
