use tracing::debug;

/// Encodes an accounting year and month into the period bucket used by the
/// ledger and KPI tables: `year * 100 + month`.
///
/// Months outside 1..=12 are clamped, not rejected. Legacy exports use
/// month 0 for opening entries and month 13 for closing entries, and those
/// records still belong to the nearest real period.
pub fn period_id(year: i32, month: i32) -> i32 {
    let clamped = month.clamp(1, 12);
    if clamped != month {
        debug!(year, month, "clamping out-of-range month to {}", clamped);
    }
    year * 100 + clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_year_and_month() {
        assert_eq!(period_id(2024, 1), 202401);
        assert_eq!(period_id(2024, 6), 202406);
        assert_eq!(period_id(2024, 12), 202412);
    }

    #[test]
    fn clamps_out_of_range_months() {
        assert_eq!(period_id(2024, 0), 202401);
        assert_eq!(period_id(2024, 13), 202412);
        assert_eq!(period_id(2024, -3), 202401);
        assert_eq!(period_id(2024, 99), 202412);
    }
}
