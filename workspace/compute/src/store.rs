use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, Set, TransactionTrait,
};
use tracing::trace;

use common::AccountFilter;
use model::entities::{kpi, kpi_datum};

use crate::error::Result;
use crate::query::{LedgerView, ValueColumn, kpi_sum_query, ledger_periods_query, view_sum_query};

/// One (period, aggregated value) pair returned by an aggregate query.
/// The value is `None` for a sum over zero rows.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct PeriodValue {
    pub period_id: i32,
    pub value: Option<Decimal>,
}

/// Read-only aggregate access to the committed ledger.
#[async_trait]
pub trait LedgerReader {
    /// Per-period sums of a signed movement column over one ledger view.
    async fn view_sums(
        &self,
        view: LedgerView,
        value: ValueColumn,
        filter: Option<&AccountFilter>,
    ) -> Result<Vec<PeriodValue>>;

    /// Per-period sums of one indicator's already-persisted values.
    async fn kpi_sums(&self, kpi_id: &str) -> Result<Vec<PeriodValue>>;

    /// The distinct periods present in the document table.
    async fn ledger_periods(&self) -> Result<Vec<i32>>;
}

/// Append-only store for computed KPI data with per-KPI commit checkpoints.
#[async_trait]
pub trait KpiSink {
    async fn insert_kpi(&mut self, id: &str) -> Result<()>;
    async fn insert_datum(&mut self, datum: kpi_datum::Model) -> Result<()>;
    async fn commit(&mut self) -> Result<()>;
}

/// SeaORM-backed ledger reader over the read views.
pub struct DatabaseLedger<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DatabaseLedger<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LedgerReader for DatabaseLedger<'_> {
    async fn view_sums(
        &self,
        view: LedgerView,
        value: ValueColumn,
        filter: Option<&AccountFilter>,
    ) -> Result<Vec<PeriodValue>> {
        let statement = self
            .db
            .get_database_backend()
            .build(&view_sum_query(view, value, filter));
        trace!(view = view.table(), "running view aggregate");
        Ok(PeriodValue::find_by_statement(statement).all(self.db).await?)
    }

    async fn kpi_sums(&self, kpi_id: &str) -> Result<Vec<PeriodValue>> {
        let statement = self.db.get_database_backend().build(&kpi_sum_query(kpi_id));
        Ok(PeriodValue::find_by_statement(statement).all(self.db).await?)
    }

    async fn ledger_periods(&self) -> Result<Vec<i32>> {
        #[derive(FromQueryResult)]
        struct PeriodRow {
            period_id: i32,
        }

        let statement = self.db.get_database_backend().build(&ledger_periods_query());
        let rows = PeriodRow::find_by_statement(statement).all(self.db).await?;
        Ok(rows.into_iter().map(|row| row.period_id).collect())
    }
}

/// SeaORM-backed KPI sink. Rows are buffered and written inside one
/// transaction per commit checkpoint, so each indicator's result set lands
/// atomically and is visible to the indicators evaluated after it.
pub struct DatabaseKpiStore<'a> {
    db: &'a DatabaseConnection,
    pending_kpis: Vec<kpi::ActiveModel>,
    pending_data: Vec<kpi_datum::ActiveModel>,
}

impl<'a> DatabaseKpiStore<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            pending_kpis: Vec::new(),
            pending_data: Vec::new(),
        }
    }
}

#[async_trait]
impl KpiSink for DatabaseKpiStore<'_> {
    async fn insert_kpi(&mut self, id: &str) -> Result<()> {
        self.pending_kpis.push(kpi::ActiveModel {
            id: Set(id.to_owned()),
        });
        Ok(())
    }

    async fn insert_datum(&mut self, datum: kpi_datum::Model) -> Result<()> {
        self.pending_data.push(kpi_datum::ActiveModel {
            id: Set(datum.id),
            kpi_id: Set(datum.kpi_id),
            period_id: Set(datum.period_id),
            value: Set(datum.value),
        });
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        if self.pending_kpis.is_empty() && self.pending_data.is_empty() {
            return Ok(());
        }
        let kpis = std::mem::take(&mut self.pending_kpis);
        let data = std::mem::take(&mut self.pending_data);

        let txn = self.db.begin().await?;
        if !kpis.is_empty() {
            kpi::Entity::insert_many(kpis).exec(&txn).await?;
        }
        if !data.is_empty() {
            kpi_datum::Entity::insert_many(data).exec(&txn).await?;
        }
        txn.commit().await?;
        Ok(())
    }
}
