//! Signal derivation - deviations, classification and enhancement
//!
//! All functions here are pure: malformed input degrades to `None`,
//! No Signal or No Prediction instead of an error.

pub mod classifier;
pub mod deviation;
pub mod enhancer;
pub mod signal;
pub mod volatility;

use serde::{Deserialize, Serialize};

// Re-export main types for convenience
pub use classifier::{
    classify_base, classify_predictive, ImpactThresholds, PredictiveThresholds, ThresholdTable,
};
pub use deviation::{deviation_pct, percent_diff};
pub use enhancer::{confidence, enhance_with_sentiment, enhance_with_technical, SentimentLexicon};
pub use signal::{Direction, PredictiveSignal, Signal, SignalTier, Volatility};
pub use volatility::volatility;

/// Constants injected into the classifier and enhancer.
/// `Default` reproduces the stock thresholds and keyword lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    #[serde(default)]
    pub thresholds: ThresholdTable,
    #[serde(default)]
    pub predictive: PredictiveThresholds,
    #[serde(default)]
    pub lexicon: SentimentLexicon,
}
