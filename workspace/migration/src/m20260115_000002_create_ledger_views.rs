use sea_orm::ConnectionTrait;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Read-only views consumed by the KPI layer.
///
/// `v_history` exposes each committed ledger movement with its period and
/// the signed columns the aggregates sum over; the cost/revenue/profit-loss
/// views restrict it to the PCMN account classes (6 = charges, 7 =
/// produits). `v_kpi` exposes persisted KPI data so later indicators can
/// read earlier indicators' results.
const CREATE_VIEWS: &[&str] = &[
    "CREATE VIEW v_history AS \
     SELECT h.id AS line_id, d.period_id AS period_id, h.account_id AS account_id, \
            a.category AS account_category, h.debit AS debit, h.credit AS credit, \
            h.debit - h.credit AS debit_credit, h.credit - h.debit AS credit_debit \
     FROM history_line h \
     JOIN document d ON d.id = h.document_id \
     LEFT JOIN account a ON a.id = h.account_id",
    "CREATE VIEW v_history_cost AS \
     SELECT * FROM v_history WHERE account_id LIKE '6%'",
    "CREATE VIEW v_history_revenue AS \
     SELECT * FROM v_history WHERE account_id LIKE '7%'",
    "CREATE VIEW v_history_profit_loss AS \
     SELECT * FROM v_history WHERE account_id LIKE '6%' OR account_id LIKE '7%'",
    "CREATE VIEW v_kpi AS \
     SELECT kpi_id, period_id, value FROM kpidata",
];

const DROP_VIEWS: &[&str] = &[
    "DROP VIEW v_kpi",
    "DROP VIEW v_history_profit_loss",
    "DROP VIEW v_history_revenue",
    "DROP VIEW v_history_cost",
    "DROP VIEW v_history",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let connection = manager.get_connection();
        for statement in CREATE_VIEWS {
            connection.execute_unprepared(statement).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let connection = manager.get_connection();
        for statement in DROP_VIEWS {
            connection.execute_unprepared(statement).await?;
        }
        Ok(())
    }
}
