use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use tracing::{debug, info};

use common::{IdSequence, KpiSettings, safe_divide};
use model::entities::kpi_datum;

use crate::catalog::{CATALOG, KpiDefinition};
use crate::error::Result;
use crate::graph::evaluation_order;
use crate::query::AggregateSpec;
use crate::store::{KpiSink, LedgerReader, PeriodValue};

/// Evaluates the KPI catalog in dependency order against the committed
/// ledger, persisting one row per (indicator, period).
///
/// An indicator absent from the configuration, or present with
/// `enable: false`, is skipped entirely; everything else about an
/// evaluation failing is an error that aborts the phase.
pub struct KpiScheduler<'a> {
    settings: &'a BTreeMap<String, KpiSettings>,
    datum_ids: IdSequence,
}

impl<'a> KpiScheduler<'a> {
    pub fn new(settings: &'a BTreeMap<String, KpiSettings>) -> Self {
        Self {
            settings,
            datum_ids: IdSequence::new(),
        }
    }

    /// Runs every configured indicator and returns the number of rows
    /// written. Each indicator's full result set is committed before the
    /// next one runs, so later indicators read earlier results.
    pub async fn run<R, S>(mut self, reader: &R, sink: &mut S) -> Result<u64>
    where
        R: LedgerReader + Sync,
        S: KpiSink + Send,
    {
        let order = evaluation_order(CATALOG)?;
        let mut written = 0u64;
        for definition in order {
            match self.settings.get(definition.id) {
                Some(settings) if settings.enabled() => {
                    written += self.evaluate(definition, settings, reader, sink).await?;
                }
                _ => {
                    info!("Skipping KPI {}", definition.id);
                }
            }
        }
        Ok(written)
    }

    async fn evaluate<R, S>(
        &mut self,
        definition: &KpiDefinition,
        settings: &KpiSettings,
        reader: &R,
        sink: &mut S,
    ) -> Result<u64>
    where
        R: LedgerReader + Sync,
        S: KpiSink + Send,
    {
        info!("Calculating KPI {}", definition.id);
        let values = self.aggregate(definition, settings, reader).await?;
        if !values.is_empty() {
            sink.insert_kpi(definition.id).await?;
        }
        let count = values.len() as u64;
        for PeriodValue { period_id, value } in values {
            sink.insert_datum(kpi_datum::Model {
                id: self.datum_ids.next_id(),
                kpi_id: definition.id.to_owned(),
                period_id,
                value,
            })
            .await?;
        }
        sink.commit().await?;
        debug!("KPI {} produced {} rows", definition.id, count);
        Ok(count)
    }

    async fn aggregate<R: LedgerReader + Sync>(
        &self,
        definition: &KpiDefinition,
        settings: &KpiSettings,
        reader: &R,
    ) -> Result<Vec<PeriodValue>> {
        match &definition.spec {
            AggregateSpec::ViewSum { view, value, filter } => {
                let filter = match filter {
                    Some(parameter) => Some(parameter.resolve(definition.id, settings)?),
                    None => None,
                };
                reader.view_sums(*view, *value, filter).await
            }
            AggregateSpec::ViewRatio { numerator, denominator } => {
                let numerator_filter = numerator.filter.resolve(definition.id, settings)?;
                let denominator_filter = denominator.filter.resolve(definition.id, settings)?;
                let numerators = reader
                    .view_sums(numerator.view, numerator.value, Some(numerator_filter))
                    .await?;
                let denominators = reader
                    .view_sums(denominator.view, denominator.value, Some(denominator_filter))
                    .await?;
                Ok(ratio_by_period(numerators, denominators, false))
            }
            AggregateSpec::KpiRatio { numerator, denominator, percent } => {
                let numerators = reader.kpi_sums(numerator).await?;
                let denominators = reader.kpi_sums(denominator).await?;
                Ok(ratio_by_period(numerators, denominators, *percent))
            }
            AggregateSpec::PeriodConstant { value } => {
                let periods = reader.ledger_periods().await?;
                Ok(periods
                    .into_iter()
                    .map(|period_id| PeriodValue {
                        period_id,
                        value: Some(*value),
                    })
                    .collect())
            }
        }
    }
}

/// Joins two per-period sum sets and safe-divides them. Every period seen
/// by either side produces a row; the value stays absent wherever the
/// division has no result.
fn ratio_by_period(
    numerators: Vec<PeriodValue>,
    denominators: Vec<PeriodValue>,
    percent: bool,
) -> Vec<PeriodValue> {
    let numerators: BTreeMap<i32, Option<Decimal>> = numerators
        .into_iter()
        .map(|row| (row.period_id, row.value))
        .collect();
    let denominators: BTreeMap<i32, Option<Decimal>> = denominators
        .into_iter()
        .map(|row| (row.period_id, row.value))
        .collect();

    let periods: BTreeSet<i32> = numerators.keys().chain(denominators.keys()).copied().collect();
    periods
        .into_iter()
        .map(|period_id| {
            let value = safe_divide(
                numerators.get(&period_id).copied().flatten(),
                denominators.get(&period_id).copied().flatten(),
            )
            .map(|ratio| if percent { ratio * Decimal::ONE_HUNDRED } else { ratio });
            PeriodValue { period_id, value }
        })
        .collect()
}
