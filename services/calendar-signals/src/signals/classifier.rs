//! Threshold-based classification of deviations

use serde::{Deserialize, Serialize};

use super::deviation::percent_diff;
use super::signal::{PredictiveSignal, Signal};
use crate::types::Impact;

/// Strong/medium deviation thresholds, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactThresholds {
    pub strong: f64,
    pub medium: f64,
}

impl ImpactThresholds {
    pub const fn new(strong: f64, medium: f64) -> Self {
        Self { strong, medium }
    }
}

/// Thresholds for released events, per impact tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdTable {
    pub high: ImpactThresholds,
    pub medium: ImpactThresholds,
    pub low: ImpactThresholds,
    /// Used when the impact is missing or unrecognized
    pub unspecified: ImpactThresholds,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            high: ImpactThresholds::new(10.0, 3.0),
            medium: ImpactThresholds::new(7.0, 2.0),
            low: ImpactThresholds::new(3.0, 1.0),
            unspecified: ImpactThresholds::new(5.0, 2.0),
        }
    }
}

impl ThresholdTable {
    pub fn for_impact(&self, impact: Option<Impact>) -> ImpactThresholds {
        match impact {
            Some(Impact::High) => self.high,
            Some(Impact::Medium) => self.medium,
            Some(Impact::Low) => self.low,
            None => self.unspecified,
        }
    }
}

/// Forecast-vs-previous thresholds for unreleased events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictiveThresholds {
    pub high: f64,
    pub medium: f64,
    /// Low and unspecified impact
    pub other: f64,
}

impl Default for PredictiveThresholds {
    fn default() -> Self {
        Self {
            high: 8.0,
            medium: 5.0,
            other: 3.0,
        }
    }
}

impl PredictiveThresholds {
    pub fn for_impact(&self, impact: Option<Impact>) -> f64 {
        match impact {
            Some(Impact::High) => self.high,
            Some(Impact::Medium) => self.medium,
            _ => self.other,
        }
    }
}

/// Base signal from actual-vs-forecast and actual-vs-previous deviations.
///
/// First match wins: Strong Buy, Medium Buy, Strong Sell, Medium Sell, Neutral.
/// Without both an actual and a forecast the deviations mean nothing and the
/// result is No Signal.
pub fn classify_base(
    table: &ThresholdTable,
    impact: Option<Impact>,
    diff_forecast: f64,
    diff_previous: f64,
    actual_present: bool,
    forecast_present: bool,
) -> Signal {
    if !actual_present || !forecast_present {
        return Signal::NoSignal;
    }

    let t = table.for_impact(impact);

    if diff_forecast > t.strong && diff_previous > t.strong {
        Signal::StrongBuy
    } else if diff_forecast > t.medium {
        Signal::MediumBuy
    } else if diff_forecast < -t.strong && diff_previous < -t.strong {
        Signal::StrongSell
    } else if diff_forecast < -t.medium {
        Signal::MediumSell
    } else {
        Signal::Neutral
    }
}

/// Predictive signal from forecast relative to previous
pub fn classify_predictive(
    thresholds: &PredictiveThresholds,
    impact: Option<Impact>,
    forecast: Option<f64>,
    previous: Option<f64>,
) -> PredictiveSignal {
    if forecast.is_none() || previous.is_none() {
        return PredictiveSignal::NoPrediction;
    }

    let threshold = thresholds.for_impact(impact);
    let diff = percent_diff(forecast, previous);

    if diff > threshold {
        PredictiveSignal::PotentiallyBullish
    } else if diff < -threshold {
        PredictiveSignal::PotentiallyBearish
    } else {
        PredictiveSignal::LikelyNeutral
    }
}
