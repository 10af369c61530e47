//! Volatility flag for unreleased high-impact events

use super::signal::Volatility;
use crate::types::Impact;

/// High-impact events whose actual hasn't printed yet may move the market
pub fn volatility(impact: Option<Impact>, actual_present: bool) -> Volatility {
    if impact == Some(Impact::High) && !actual_present {
        Volatility::PotentialVolatility
    } else {
        Volatility::NoVolatilityExpected
    }
}
