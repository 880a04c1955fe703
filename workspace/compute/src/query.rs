//! Structured aggregate queries over the ledger read views.
//!
//! Specs are data, not SQL text: view and column names come from closed
//! enums, and account filters are compiled into conditions whose values
//! are bound as parameters.

use rust_decimal::Decimal;
use sea_orm::sea_query::{Alias, Condition, Expr, Func, Query, SelectStatement};

use common::{AccountFilter, KpiSettings};

use crate::error::{ComputeError, Result};

/// The read-only ledger views exposed by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerView {
    History,
    Cost,
    Revenue,
    ProfitLoss,
}

impl LedgerView {
    pub fn table(self) -> &'static str {
        match self {
            LedgerView::History => "v_history",
            LedgerView::Cost => "v_history_cost",
            LedgerView::Revenue => "v_history_revenue",
            LedgerView::ProfitLoss => "v_history_profit_loss",
        }
    }
}

/// Signed movement column to aggregate over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueColumn {
    DebitMinusCredit,
    CreditMinusDebit,
}

impl ValueColumn {
    pub fn column(self) -> &'static str {
        match self {
            ValueColumn::DebitMinusCredit => "debit_credit",
            ValueColumn::CreditMinusDebit => "credit_debit",
        }
    }
}

/// Which per-KPI configuration parameter supplies an account filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterParam {
    AccountFilter,
    AccountFilterAssets,
    AccountFilterLiabilities,
}

impl FilterParam {
    pub fn name(self) -> &'static str {
        match self {
            FilterParam::AccountFilter => "account_filter",
            FilterParam::AccountFilterAssets => "account_filter_assets",
            FilterParam::AccountFilterLiabilities => "account_filter_liabilities",
        }
    }

    /// Looks the parameter up in the per-KPI settings. A spec that names a
    /// parameter the configuration does not supply fails loudly instead of
    /// producing an unfiltered aggregate.
    pub fn resolve<'a>(self, kpi: &str, settings: &'a KpiSettings) -> Result<&'a AccountFilter> {
        let filter = match self {
            FilterParam::AccountFilter => settings.account_filter.as_ref(),
            FilterParam::AccountFilterAssets => settings.account_filter_assets.as_ref(),
            FilterParam::AccountFilterLiabilities => settings.account_filter_liabilities.as_ref(),
        };
        filter.ok_or_else(|| ComputeError::MissingParameter {
            kpi: kpi.to_owned(),
            parameter: self.name(),
        })
    }
}

/// One term of a view ratio: which view, which signed column, and the
/// filter parameter it is restricted by.
#[derive(Debug, Clone, Copy)]
pub struct ViewTerm {
    pub view: LedgerView,
    pub value: ValueColumn,
    pub filter: FilterParam,
}

/// How a KPI's per-period values are produced.
#[derive(Debug, Clone)]
pub enum AggregateSpec {
    /// Per-period SUM over one ledger view, optionally account-filtered.
    ViewSum {
        view: LedgerView,
        value: ValueColumn,
        filter: Option<FilterParam>,
    },
    /// Safe per-period ratio of two filtered view sums.
    ViewRatio {
        numerator: ViewTerm,
        denominator: ViewTerm,
    },
    /// Safe per-period ratio of two previously persisted indicators,
    /// scaled to a percentage when `percent` is set.
    KpiRatio {
        numerator: &'static str,
        denominator: &'static str,
        percent: bool,
    },
    /// One row per distinct ledger period with a fixed value.
    PeriodConstant { value: Decimal },
}

/// Builds the grouped per-period SUM select for one view term.
pub fn view_sum_query(
    view: LedgerView,
    value: ValueColumn,
    filter: Option<&AccountFilter>,
) -> SelectStatement {
    let mut select = Query::select();
    select
        .column(Alias::new("period_id"))
        .expr_as(Func::sum(Expr::col(Alias::new(value.column()))), Alias::new("value"))
        .from(Alias::new(view.table()))
        .group_by_col(Alias::new("period_id"));
    if let Some(filter) = filter {
        select.cond_where(account_condition(filter));
    }
    select
}

/// Builds the per-period SUM of one indicator's persisted values.
pub fn kpi_sum_query(kpi_id: &str) -> SelectStatement {
    Query::select()
        .column(Alias::new("period_id"))
        .expr_as(Func::sum(Expr::col(Alias::new("value"))), Alias::new("value"))
        .from(Alias::new("v_kpi"))
        .and_where(Expr::col(Alias::new("kpi_id")).eq(kpi_id))
        .group_by_col(Alias::new("period_id"))
        .to_owned()
}

/// Builds the distinct-period select over the document table.
pub fn ledger_periods_query() -> SelectStatement {
    Query::select()
        .column(Alias::new("period_id"))
        .distinct()
        .from(Alias::new("document"))
        .to_owned()
}

/// Compiles a structured account filter into a condition. The prefixes and
/// ids are bound as values; an empty filter restricts nothing.
fn account_condition(filter: &AccountFilter) -> Condition {
    let mut condition = Condition::any();
    for prefix in &filter.prefixes {
        condition = condition.add(Expr::col(Alias::new("account_id")).like(format!("{prefix}%")));
    }
    if !filter.accounts.is_empty() {
        condition = condition.add(Expr::col(Alias::new("account_id")).is_in(filter.accounts.clone()));
    }
    condition
}
