//! Topological ordering of the KPI catalog.
//!
//! Dependencies are explicit data on each definition. A cycle or a
//! dependency on an unknown indicator is a hard error raised before any
//! KPI is evaluated, rather than silently reading stale or absent data.

use std::collections::HashMap;

use crate::catalog::KpiDefinition;
use crate::error::{ComputeError, Result};

/// Returns the catalog in an order where every definition follows all of
/// its dependencies. Declaration order is preserved among definitions that
/// are not ordered relative to each other.
pub fn evaluation_order(catalog: &[KpiDefinition]) -> Result<Vec<&KpiDefinition>> {
    let index: HashMap<&str, usize> = catalog
        .iter()
        .enumerate()
        .map(|(position, definition)| (definition.id, position))
        .collect();

    let mut blockers = vec![0usize; catalog.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); catalog.len()];
    for (position, definition) in catalog.iter().enumerate() {
        for dependency in definition.depends_on {
            let Some(&upstream) = index.get(dependency) else {
                return Err(ComputeError::UnknownDependency {
                    kpi: definition.id.to_owned(),
                    dependency: (*dependency).to_owned(),
                });
            };
            blockers[position] += 1;
            dependents[upstream].push(position);
        }
    }

    // Kahn's algorithm with a min-position heap keeps the output stable
    // with respect to declaration order.
    use std::cmp::Reverse;
    use std::collections::BinaryHeap;
    let mut ready: BinaryHeap<Reverse<usize>> = blockers
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count == 0)
        .map(|(position, _)| Reverse(position))
        .collect();

    let mut order = Vec::with_capacity(catalog.len());
    let mut emitted = vec![false; catalog.len()];
    while let Some(Reverse(position)) = ready.pop() {
        emitted[position] = true;
        order.push(&catalog[position]);
        for &dependent in &dependents[position] {
            blockers[dependent] -= 1;
            if blockers[dependent] == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }

    if order.len() != catalog.len() {
        let stuck = catalog
            .iter()
            .zip(&emitted)
            .find(|&(_, &done)| !done)
            .map(|(definition, _)| definition.id.to_owned())
            .unwrap_or_default();
        return Err(ComputeError::DependencyCycle(stuck));
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::CATALOG;
    use crate::query::AggregateSpec;

    fn definition(id: &'static str, depends_on: &'static [&'static str]) -> KpiDefinition {
        KpiDefinition {
            id,
            spec: AggregateSpec::PeriodConstant { value: Decimal::ONE },
            depends_on,
        }
    }

    #[test]
    fn catalog_orders_margins_after_their_inputs() {
        let order = evaluation_order(CATALOG).unwrap();
        assert_eq!(order.len(), CATALOG.len());
        let position = |id: &str| order.iter().position(|d| d.id == id).unwrap();
        assert!(position("financial.margin.gross") > position("financial.profit.gross"));
        assert!(position("financial.margin.gross") > position("financial.revenue.sales"));
        assert!(position("financial.margin.net") > position("financial.profit.net"));
    }

    #[test]
    fn declaration_order_is_stable_for_independent_definitions() {
        let catalog = vec![
            definition("c", &[]),
            definition("a", &[]),
            definition("b", &[]),
        ];
        let order = evaluation_order(&catalog).unwrap();
        let ids: Vec<&str> = order.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn dependencies_pull_definitions_forward() {
        let catalog = vec![
            definition("ratio", &["denominator", "numerator"]),
            definition("numerator", &[]),
            definition("denominator", &[]),
        ];
        let order = evaluation_order(&catalog).unwrap();
        let ids: Vec<&str> = order.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["numerator", "denominator", "ratio"]);
    }

    #[test]
    fn cycles_fail_fast() {
        let catalog = vec![
            definition("a", &["b"]),
            definition("b", &["a"]),
        ];
        let error = evaluation_order(&catalog).unwrap_err();
        assert!(matches!(error, ComputeError::DependencyCycle(_)));
    }

    #[test]
    fn unknown_dependencies_fail_fast() {
        let catalog = vec![definition("a", &["ghost"])];
        let error = evaluation_order(&catalog).unwrap_err();
        assert!(matches!(
            error,
            ComputeError::UnknownDependency { dependency, .. } if dependency == "ghost"
        ));
    }
}
