//! Signal vocabulary - categorical outputs of the derivation stages

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade direction carried by a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
}

/// Base, technical-enhanced and sentiment-adjusted signals.
/// Serializes to the display strings ("Strong Buy", "No Signal", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    #[serde(rename = "No Signal")]
    NoSignal,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    #[serde(rename = "Medium Buy")]
    MediumBuy,
    #[serde(rename = "Strong Sell")]
    StrongSell,
    #[serde(rename = "Medium Sell")]
    MediumSell,
    /// Strong Buy confirmed by a bullish trend
    #[serde(rename = "High Confidence Buy")]
    HighConfidenceBuy,
    /// Medium Buy confirmed by a bullish trend
    #[serde(rename = "Confident Buy")]
    ConfidentBuy,
    #[serde(rename = "High Confidence Sell")]
    HighConfidenceSell,
    #[serde(rename = "Confident Sell")]
    ConfidentSell,
    #[serde(rename = "Sentiment Buy")]
    SentimentBuy,
    #[serde(rename = "Sentiment Sell")]
    SentimentSell,
    #[serde(rename = "Strong Sentiment Buy")]
    StrongSentimentBuy,
    #[serde(rename = "Strong Sentiment Sell")]
    StrongSentimentSell,
}

/// Strength tier used to seed confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalTier {
    Strong,
    Medium,
    Neutral,
    Other,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::NoSignal => "No Signal",
            Signal::Neutral => "Neutral",
            Signal::StrongBuy => "Strong Buy",
            Signal::MediumBuy => "Medium Buy",
            Signal::StrongSell => "Strong Sell",
            Signal::MediumSell => "Medium Sell",
            Signal::HighConfidenceBuy => "High Confidence Buy",
            Signal::ConfidentBuy => "Confident Buy",
            Signal::HighConfidenceSell => "High Confidence Sell",
            Signal::ConfidentSell => "Confident Sell",
            Signal::SentimentBuy => "Sentiment Buy",
            Signal::SentimentSell => "Sentiment Sell",
            Signal::StrongSentimentBuy => "Strong Sentiment Buy",
            Signal::StrongSentimentSell => "Strong Sentiment Sell",
        }
    }

    /// Buy/Sell direction, `None` for Neutral and No Signal
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Signal::StrongBuy
            | Signal::MediumBuy
            | Signal::HighConfidenceBuy
            | Signal::ConfidentBuy
            | Signal::SentimentBuy
            | Signal::StrongSentimentBuy => Some(Direction::Buy),
            Signal::StrongSell
            | Signal::MediumSell
            | Signal::HighConfidenceSell
            | Signal::ConfidentSell
            | Signal::SentimentSell
            | Signal::StrongSentimentSell => Some(Direction::Sell),
            Signal::NoSignal | Signal::Neutral => None,
        }
    }

    /// Tier by the strength word in the signal name
    pub fn tier(&self) -> SignalTier {
        match self {
            Signal::StrongBuy
            | Signal::StrongSell
            | Signal::StrongSentimentBuy
            | Signal::StrongSentimentSell => SignalTier::Strong,
            Signal::MediumBuy | Signal::MediumSell => SignalTier::Medium,
            Signal::Neutral => SignalTier::Neutral,
            _ => SignalTier::Other,
        }
    }

    /// Sentiment override in the direction of the score's sign
    pub fn strong_sentiment(score: f64) -> Self {
        if score > 0.0 {
            Signal::StrongSentimentBuy
        } else {
            Signal::StrongSentimentSell
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forward-looking signal for events without a released actual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictiveSignal {
    #[serde(rename = "No Prediction")]
    NoPrediction,
    #[serde(rename = "Potentially Bullish")]
    PotentiallyBullish,
    #[serde(rename = "Potentially Bearish")]
    PotentiallyBearish,
    #[serde(rename = "Likely Neutral")]
    LikelyNeutral,
}

impl PredictiveSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictiveSignal::NoPrediction => "No Prediction",
            PredictiveSignal::PotentiallyBullish => "Potentially Bullish",
            PredictiveSignal::PotentiallyBearish => "Potentially Bearish",
            PredictiveSignal::LikelyNeutral => "Likely Neutral",
        }
    }
}

impl fmt::Display for PredictiveSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Volatility expectation around an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Volatility {
    #[serde(rename = "Potential Volatility")]
    PotentialVolatility,
    #[serde(rename = "No Volatility Expected")]
    NoVolatilityExpected,
}

impl Volatility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Volatility::PotentialVolatility => "Potential Volatility",
            Volatility::NoVolatilityExpected => "No Volatility Expected",
        }
    }
}

impl fmt::Display for Volatility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
