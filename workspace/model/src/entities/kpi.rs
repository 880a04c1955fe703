use sea_orm::entity::prelude::*;

/// A named financial indicator, e.g. `financial.margin.net`. Rows are
/// registered when a definition first produces data for a run.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "kpi")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::kpi_datum::Entity")]
    KpiDatum,
}

impl Related<super::kpi_datum::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KpiDatum.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
