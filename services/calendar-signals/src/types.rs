use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::signals::{PredictiveSignal, Signal, Volatility};

/// Economic calendar event as produced by the extraction layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomicEvent {
    #[serde(default, deserialize_with = "lenient_text_required")]
    pub date: String,            // "2024-01-01"
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: Option<String>,    // "08:30", "All Day", "Tentative"
    #[serde(default, deserialize_with = "lenient_text_required")]
    pub country: String,         // currency/country code, "USD"
    #[serde(default, deserialize_with = "lenient_text_required")]
    pub event: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub impact: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub actual: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub forecast: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub previous: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub source: Option<String>,  // "CashbackForex", "ForexFactory"
}

impl EconomicEvent {
    pub fn new(date: impl Into<String>, country: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            country: country.into(),
            event: event.into(),
            ..Default::default()
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = Some(impact.into());
        self
    }

    /// Set actual/forecast/previous readings in one call
    pub fn with_readings(
        mut self,
        actual: Option<&str>,
        forecast: Option<&str>,
        previous: Option<&str>,
    ) -> Self {
        self.actual = actual.map(str::to_string);
        self.forecast = forecast.map(str::to_string);
        self.previous = previous.map(str::to_string);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Natural key used upstream for upsert de-duplication
    pub fn event_id(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.date,
            self.time.as_deref().unwrap_or("00:00"),
            self.country,
            self.event
        )
    }

    /// Date, country and event title are all present
    pub fn is_usable(&self) -> bool {
        !self.date.trim().is_empty()
            && !self.country.trim().is_empty()
            && !self.event.trim().is_empty()
    }
}

/// Accept strings, numbers or null for free-form text fields.
/// Raw imports sometimes carry readings as JSON numbers.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_text_required<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

/// Impact tier of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        }
    }
}

/// Technical trend direction for a currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
    #[serde(other)]
    Unknown,
}

/// Technical indicator snapshot for a country/currency code.
/// Only `trend` drives signal logic; everything else rides along.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIndicators {
    #[serde(default)]
    pub trend: Option<Trend>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TechnicalIndicators {
    pub fn with_trend(trend: Trend) -> Self {
        Self {
            trend: Some(trend),
            extra: serde_json::Map::new(),
        }
    }
}

/// Technical indicators keyed by country/currency code
pub type TechnicalData = HashMap<String, TechnicalIndicators>;

/// Sentiment scores in [-1, 1] keyed by event title
pub type SentimentData = HashMap<String, f64>;

/// Enriched output record, one per input event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub date: String,
    pub time: Option<String>,
    pub formatted_datetime: Option<String>,
    pub country: String,
    pub event: String,
    pub impact: Option<String>,
    pub actual_raw: Option<String>,
    pub forecast_raw: Option<String>,
    pub previous_raw: Option<String>,
    pub actual: Option<f64>,
    pub forecast: Option<f64>,
    pub previous: Option<f64>,
    pub base_signal: Signal,
    pub predictive_signal: PredictiveSignal,
    pub enhanced_signal: Signal,
    pub final_signal: Signal,
    pub volatility: Volatility,
    pub confidence: f64,           // 0.0 - 0.95
    pub diff_forecast_pct: Option<f64>,
    pub diff_previous_pct: Option<f64>,
    pub source: Option<String>,
}

/// Event source health/status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceHealth {
    pub source: String,
    pub is_healthy: bool,
    pub last_success: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub success_rate: f64,
    pub avg_latency_ms: u64,
}

/// Error types for event collection
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded for {source_name}")]
    RateLimit { source_name: String, retry_after: Option<u64> },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Source unhealthy: {0}")]
    SourceUnhealthy(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for event collection
pub type Result<T> = std::result::Result<T, FeedError>;

/// Trait for economic calendar event sources
#[async_trait::async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch the current set of normalized events
    async fn fetch_events(&self) -> Result<Vec<EconomicEvent>>;

    /// Get source health status
    async fn health(&self) -> SourceHealth;

    /// Source name
    fn name(&self) -> &str;
}
