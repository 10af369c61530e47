// Batch summary statistics over evaluated events
use crate::signals::{Direction, PredictiveSignal, Signal, Volatility};
use crate::types::SignalRecord;
use serde::Serialize;

/// Signal counts for one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignalSummary {
    pub total: usize,
    pub buy: usize,
    pub sell: usize,
    pub neutral: usize,
    pub no_signal: usize,
    /// Events with a predictive signal other than No Prediction
    pub predictive: usize,
    pub volatility_alerts: usize,
}

impl SignalSummary {
    /// Count final signals, predictive signals and volatility flags
    pub fn from_records(records: &[SignalRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            match record.final_signal.direction() {
                Some(Direction::Buy) => summary.buy += 1,
                Some(Direction::Sell) => summary.sell += 1,
                None if record.final_signal == Signal::Neutral => summary.neutral += 1,
                None => summary.no_signal += 1,
            }

            if record.predictive_signal != PredictiveSignal::NoPrediction {
                summary.predictive += 1;
            }
            if record.volatility == Volatility::PotentialVolatility {
                summary.volatility_alerts += 1;
            }
        }

        summary
    }
}
