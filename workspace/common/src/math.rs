use rust_decimal::Decimal;

/// Division primitive for ratio indicators.
///
/// An aggregate over zero rows surfaces as `None` rather than zero, and a
/// zero denominator has no meaningful ratio, so both cases yield `None` --
/// never an error and never infinity.
pub fn safe_divide(numerator: Option<Decimal>, denominator: Option<Decimal>) -> Option<Decimal> {
    let numerator = numerator?;
    let denominator = denominator?;
    if denominator.is_zero() {
        return None;
    }
    numerator.checked_div(denominator)
}
