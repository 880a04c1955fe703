use sea_orm::entity::prelude::*;

/// A customer or supplier as carried in the source company file.
/// Created once per import run and read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "party")]
pub struct Model {
    /// Natural key from the source (bob50 `CID`).
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub customer: bool,
    pub supplier: bool,
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
