//! Technical and sentiment adjustments on top of the base signal

use serde::{Deserialize, Serialize};

use super::signal::{Signal, SignalTier};
use crate::types::{TechnicalIndicators, Trend};

/// Keyword heuristic used when no sentiment score is supplied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentLexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    /// Magnitude assigned when one side has more keyword hits
    pub keyword_score: f64,
    /// No Signal turns into a Sentiment Buy/Sell above this magnitude
    pub signal_threshold: f64,
    /// Any signal is overridden above this magnitude
    pub override_threshold: f64,
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        let words = |list: &[&str]| -> Vec<String> { list.iter().map(|w| w.to_string()).collect() };
        Self {
            positive: words(&[
                "growth", "increase", "expand", "gain", "positive", "rise", "improve", "recovery",
            ]),
            negative: words(&[
                "contraction", "decline", "decrease", "drop", "negative", "fall", "worsen",
                "recession",
            ]),
            keyword_score: 0.7,
            signal_threshold: 0.6,
            override_threshold: 0.8,
        }
    }
}

impl SentimentLexicon {
    /// Score an event title by keyword hits: +score, -score or 0 on a tie
    pub fn score(&self, event_name: &str) -> f64 {
        let name = event_name.to_lowercase();
        let positive = keyword_hits(&name, &self.positive);
        let negative = keyword_hits(&name, &self.negative);

        if positive > negative {
            self.keyword_score
        } else if negative > positive {
            -self.keyword_score
        } else {
            0.0
        }
    }
}

fn keyword_hits(name: &str, words: &[String]) -> usize {
    words
        .iter()
        .filter(|w| name.contains(w.to_lowercase().as_str()))
        .count()
}

/// Upgrade a base signal when the currency's trend agrees with it.
/// Only exact Strong/Medium pairs upgrade; everything else passes through.
pub fn enhance_with_technical(base: Signal, indicators: Option<&TechnicalIndicators>) -> Signal {
    let Some(trend) = indicators.and_then(|i| i.trend) else {
        return base;
    };

    match (base, trend) {
        (Signal::StrongBuy, Trend::Bullish) => Signal::HighConfidenceBuy,
        (Signal::MediumBuy, Trend::Bullish) => Signal::ConfidentBuy,
        (Signal::StrongSell, Trend::Bearish) => Signal::HighConfidenceSell,
        (Signal::MediumSell, Trend::Bearish) => Signal::ConfidentSell,
        _ => base,
    }
}

/// Adjust a signal with a sentiment score, deriving one from the event
/// title when none is supplied.
pub fn enhance_with_sentiment(
    lexicon: &SentimentLexicon,
    signal: Signal,
    event_name: &str,
    sentiment_score: Option<f64>,
) -> Signal {
    let score = sentiment_score.unwrap_or_else(|| lexicon.score(event_name));

    if signal == Signal::NoSignal && score > lexicon.signal_threshold {
        Signal::SentimentBuy
    } else if signal == Signal::NoSignal && score < -lexicon.signal_threshold {
        Signal::SentimentSell
    } else if score.abs() > lexicon.override_threshold {
        Signal::strong_sentiment(score)
    } else {
        signal
    }
}

/// Confidence in [0, 0.95] from the base tier and base/enhanced agreement.
///
/// The final (sentiment) signal is part of the contract but does not move the
/// score.
pub fn confidence(base: Signal, enhanced: Signal, _final_signal: Signal) -> f64 {
    let base_confidence: f64 = match base.tier() {
        SignalTier::Strong => 0.8,
        SignalTier::Medium => 0.6,
        SignalTier::Neutral => 0.5,
        SignalTier::Other => 0.3,
    };

    let consistent = base == enhanced
        || matches!(
            (base.direction(), enhanced.direction()),
            (Some(a), Some(b)) if a == b
        );

    let adjusted = if consistent {
        base_confidence + 0.1
    } else {
        base_confidence - 0.1
    };

    (adjusted.clamp(0.0, 0.95) * 100.0).round() / 100.0
}
