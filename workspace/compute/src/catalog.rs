//! The fixed indicator catalog.
//!
//! Definitions are data: an aggregate spec plus explicit dependencies on
//! other indicators. Declaration order groups the families (costs, profit,
//! revenue, solvency, liquidity, margins); the scheduler derives the
//! actual evaluation order from `depends_on`, so the margins always run
//! after the profit and revenue figures they read.

use rust_decimal::Decimal;

use crate::query::{AggregateSpec, FilterParam, LedgerView, ValueColumn, ViewTerm};

/// One KPI definition: its id, how to aggregate it, and which other
/// indicators its evaluation reads.
#[derive(Debug, Clone)]
pub struct KpiDefinition {
    pub id: &'static str,
    pub spec: AggregateSpec,
    pub depends_on: &'static [&'static str],
}

pub const CATALOG: &[KpiDefinition] = &[
    KpiDefinition {
        id: "financial.cost.total",
        spec: AggregateSpec::ViewSum {
            view: LedgerView::Cost,
            value: ValueColumn::DebitMinusCredit,
            filter: Some(FilterParam::AccountFilter),
        },
        depends_on: &[],
    },
    KpiDefinition {
        id: "financial.cost.sales",
        spec: AggregateSpec::ViewSum {
            view: LedgerView::Cost,
            value: ValueColumn::DebitMinusCredit,
            filter: Some(FilterParam::AccountFilter),
        },
        depends_on: &[],
    },
    KpiDefinition {
        id: "financial.cost.overhead",
        spec: AggregateSpec::ViewSum {
            view: LedgerView::Cost,
            value: ValueColumn::DebitMinusCredit,
            filter: Some(FilterParam::AccountFilter),
        },
        depends_on: &[],
    },
    KpiDefinition {
        id: "financial.cost.staff",
        spec: AggregateSpec::ViewSum {
            view: LedgerView::Cost,
            value: ValueColumn::DebitMinusCredit,
            filter: Some(FilterParam::AccountFilter),
        },
        depends_on: &[],
    },
    KpiDefinition {
        id: "financial.profit.gross",
        spec: AggregateSpec::ViewSum {
            view: LedgerView::History,
            value: ValueColumn::CreditMinusDebit,
            filter: Some(FilterParam::AccountFilter),
        },
        depends_on: &[],
    },
    KpiDefinition {
        id: "financial.profit.net",
        spec: AggregateSpec::ViewSum {
            view: LedgerView::ProfitLoss,
            value: ValueColumn::CreditMinusDebit,
            filter: None,
        },
        depends_on: &[],
    },
    KpiDefinition {
        id: "financial.profit.addedvalue",
        spec: AggregateSpec::ViewSum {
            view: LedgerView::History,
            value: ValueColumn::CreditMinusDebit,
            filter: Some(FilterParam::AccountFilter),
        },
        depends_on: &[],
    },
    KpiDefinition {
        id: "financial.revenue.total",
        spec: AggregateSpec::ViewSum {
            view: LedgerView::Revenue,
            value: ValueColumn::CreditMinusDebit,
            filter: None,
        },
        depends_on: &[],
    },
    KpiDefinition {
        id: "financial.revenue.sales",
        spec: AggregateSpec::ViewSum {
            view: LedgerView::Revenue,
            value: ValueColumn::CreditMinusDebit,
            filter: Some(FilterParam::AccountFilter),
        },
        depends_on: &[],
    },
    KpiDefinition {
        id: "financial.revenue.other",
        spec: AggregateSpec::ViewSum {
            view: LedgerView::Revenue,
            value: ValueColumn::CreditMinusDebit,
            filter: Some(FilterParam::AccountFilter),
        },
        depends_on: &[],
    },
    KpiDefinition {
        id: "financial.solvency",
        spec: AggregateSpec::ViewRatio {
            numerator: ViewTerm {
                view: LedgerView::History,
                value: ValueColumn::CreditMinusDebit,
                filter: FilterParam::AccountFilterAssets,
            },
            denominator: ViewTerm {
                view: LedgerView::History,
                value: ValueColumn::DebitMinusCredit,
                filter: FilterParam::AccountFilterLiabilities,
            },
        },
        depends_on: &[],
    },
    // TODO: replace the placeholder with the quick ratio
    // (cash + receivables) / current liabilities once the balance
    // classifications are filterable per period.
    KpiDefinition {
        id: "financial.liquidity",
        spec: AggregateSpec::PeriodConstant { value: Decimal::ONE },
        depends_on: &[],
    },
    KpiDefinition {
        id: "financial.margin.gross",
        spec: AggregateSpec::KpiRatio {
            numerator: "financial.profit.gross",
            denominator: "financial.revenue.sales",
            percent: true,
        },
        depends_on: &["financial.profit.gross", "financial.revenue.sales"],
    },
    KpiDefinition {
        id: "financial.margin.net",
        spec: AggregateSpec::KpiRatio {
            numerator: "financial.profit.net",
            denominator: "financial.revenue.sales",
            percent: true,
        },
        depends_on: &["financial.profit.net", "financial.revenue.sales"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        for (index, definition) in CATALOG.iter().enumerate() {
            assert!(
                CATALOG[index + 1..].iter().all(|other| other.id != definition.id),
                "duplicate id {}",
                definition.id
            );
        }
    }

    #[test]
    fn dependencies_point_into_the_catalog() {
        for definition in CATALOG {
            for dependency in definition.depends_on {
                assert!(
                    CATALOG.iter().any(|other| other.id == *dependency),
                    "{} depends on unknown {}",
                    definition.id,
                    dependency
                );
            }
        }
    }

    #[test]
    fn ratio_specs_declare_their_reads_as_dependencies() {
        for definition in CATALOG {
            if let AggregateSpec::KpiRatio { numerator, denominator, .. } = &definition.spec {
                assert!(definition.depends_on.contains(numerator));
                assert!(definition.depends_on.contains(denominator));
            }
        }
    }
}
