use std::collections::HashSet;

use rust_decimal::Decimal;

/// Status token marking a line as matched against an offsetting line.
const TALLIED: &str = "T";

/// The debit/credit/tally columns of a history line, derived from the raw
/// amount and reconciliation fields of a source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLine {
    pub debit: Decimal,
    pub credit: Decimal,
    pub tallied: bool,
    pub tally_number: Option<i64>,
}

/// Splits a signed amount into the (debit, credit) pair stored on a history
/// line. Exactly one side is nonzero unless the amount itself is zero.
pub fn split_amount(amount: Decimal) -> (Decimal, Decimal) {
    if amount < Decimal::ZERO {
        (Decimal::ZERO, amount.abs())
    } else {
        (amount, Decimal::ZERO)
    }
}

/// Pure normalization of one ledger movement.
pub fn normalize(amount: Decimal, status: &str, match_number: Option<i64>) -> NormalizedLine {
    let (debit, credit) = split_amount(amount);
    NormalizedLine {
        debit,
        credit,
        tallied: status == TALLIED,
        tally_number: match_number,
    }
}

/// The year exclusion filter. Returns false iff the accounting year is in
/// the excluded set; callers must treat a false result as a complete no-op
/// for the record (no identity consumed, no document touched, no
/// persistence call).
pub fn should_import(year: i32, excluded_years: &HashSet<i32>) -> bool {
    !excluded_years.contains(&year)
}
