use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// One computed (period, value) observation of an indicator. Rows are
/// append-only: never updated, never deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "kpidata")]
pub struct Model {
    /// Synthetic sequential id, 1-based within a run.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub kpi_id: String,
    /// Time bucket: `year * 100 + month`.
    pub period_id: i32,
    /// Aggregates over zero rows persist as null, not zero.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))", nullable)]
    pub value: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::kpi::Entity",
        from = "Column::KpiId",
        to = "super::kpi::Column::Id"
    )]
    Kpi,
}

impl Related<super::kpi::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Kpi.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
