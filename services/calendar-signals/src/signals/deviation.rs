//! Percentage deviation between two readings

/// Signed percentage difference of `actual` relative to `reference`.
///
/// Returns 0.0 when either operand is absent or the reference is exactly zero.
/// That 0.0 is a "nothing computed" sentinel, so callers that care must check
/// operand presence themselves (see [`deviation_pct`]).
pub fn percent_diff(actual: Option<f64>, reference: Option<f64>) -> f64 {
    match (actual, reference) {
        (Some(a), Some(r)) if r != 0.0 => (a - r) / r.abs() * 100.0,
        _ => 0.0,
    }
}

/// Deviation for output records: rounded to two decimals, `None` when the
/// sentinel case of [`percent_diff`] applies or the ratio overflows.
pub fn deviation_pct(actual: Option<f64>, reference: Option<f64>) -> Option<f64> {
    match (actual, reference) {
        (Some(_), Some(r)) if r != 0.0 => {
            Some((percent_diff(actual, reference) * 100.0).round() / 100.0)
                .filter(|d| d.is_finite())
        }
        _ => None,
    }
}
