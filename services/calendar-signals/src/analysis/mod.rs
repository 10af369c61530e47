//! Data contract of the external AI market analysis.
//!
//! The model call itself lives outside this crate. This module builds the
//! prompt payload and turns the model's reply into typed signals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalizers::parse_value;
use crate::types::{lenient_text, EconomicEvent, FeedError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    #[serde(rename = "BUY", alias = "Buy", alias = "buy")]
    Buy,
    #[serde(rename = "SELL", alias = "Sell", alias = "sell")]
    Sell,
    /// Anything else the model came up with ("NEUTRAL", "HOLD", ...)
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalStrength {
    #[serde(rename = "HIGH", alias = "High", alias = "high")]
    High,
    #[serde(rename = "MEDIUM", alias = "Medium", alias = "medium")]
    Medium,
    #[serde(rename = "LOW", alias = "Low", alias = "low")]
    Low,
    #[serde(other)]
    Other,
}

/// One pair-level recommendation from the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSignal {
    #[serde(default)]
    pub pair: String,
    #[serde(default)]
    pub direction: Option<TradeDirection>,
    #[serde(default)]
    pub strength: Option<SignalStrength>,
    /// Free text such as "75%"
    #[serde(default, deserialize_with = "lenient_text")]
    pub confidence: Option<String>,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub impact: String,
}

impl AnalysisSignal {
    /// Confidence in percentage points, when it reads as a number
    pub fn confidence_value(&self) -> Option<f64> {
        parse_value(self.confidence.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    #[serde(default)]
    pub market_summary: String,
    pub signals: Vec<AnalysisSignal>,
}

/// Event fields sent to the model; absent values go out as ""
#[derive(Debug, Serialize)]
struct PromptEvent<'a> {
    actual: &'a str,
    country: &'a str,
    date: &'a str,
    event: &'a str,
    forecast: &'a str,
    impact: &'a str,
    previous: &'a str,
    source: &'a str,
    time: &'a str,
}

impl<'a> From<&'a EconomicEvent> for PromptEvent<'a> {
    fn from(e: &'a EconomicEvent) -> Self {
        Self {
            actual: e.actual.as_deref().unwrap_or(""),
            country: &e.country,
            date: &e.date,
            event: &e.event,
            forecast: e.forecast.as_deref().unwrap_or(""),
            impact: e.impact.as_deref().unwrap_or(""),
            previous: e.previous.as_deref().unwrap_or(""),
            source: e.source.as_deref().unwrap_or(""),
            time: e.time.as_deref().unwrap_or(""),
        }
    }
}

/// Prompt asking the model for a `MarketAnalysis` over `events`
pub fn analysis_prompt(events: &[EconomicEvent], today: NaiveDate) -> Result<String> {
    let prompt_events: Vec<PromptEvent<'_>> = events.iter().map(PromptEvent::from).collect();
    let payload = serde_json::to_string_pretty(&prompt_events)
        .map_err(|e| FeedError::InvalidResponse(e.to_string()))?;

    Ok(format!(
        r#"Analyze the following economic data from today ({today}) and generate trading signals:
{payload}
Please provide your analysis in the following JSON format:

{{
    "market_summary": "Brief overall market summary based on economic indicators",
    "signals": [
        {{
            "pair": "Currency pair or asset",
            "direction": "BUY or SELL",
            "strength": "HIGH, MEDIUM, or LOW",
            "confidence": "Confidence level in percentage",
            "rationale": "Brief explanation of the signal",
            "impact": "Potential market impact"
        }}
    ]
}}
"#,
        today = today.format("%Y-%m-%d"),
        payload = payload,
    ))
}

/// Body of the first fenced code block (```json or bare ```), else the trimmed text
pub fn clean_json_response(text: &str) -> &str {
    let Some(open) = text.find("```") else {
        return text.trim();
    };
    let body = &text[open + 3..];
    let Some(close) = body.find("```") else {
        return text.trim();
    };
    let body = &body[..close];
    body.strip_prefix("json").unwrap_or(body).trim()
}

/// Parse a raw model reply into a `MarketAnalysis`
pub fn parse_market_analysis(text: &str) -> Result<MarketAnalysis> {
    let cleaned = clean_json_response(text);
    let value: Value = serde_json::from_str(cleaned)
        .map_err(|e| FeedError::InvalidResponse(format!("AI response is not JSON: {}", e)))?;

    if !matches!(value.get("signals"), Some(Value::Array(_))) {
        return Err(FeedError::InvalidResponse(
            "'signals' key is missing or not a list".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| FeedError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = r#"Here is the analysis:
```json
{
  "market_summary": "Hot US inflation.",
  "signals": [
    {"pair": "EUR/USD", "direction": "SELL", "strength": "High", "confidence": "80%",
     "rationale": "CPI beat", "impact": "USD strength"},
    {"pair": "USD/JPY", "direction": "buy", "strength": "LOW", "confidence": 55}
  ]
}
```
Good luck."#;

    #[test]
    fn test_clean_json_response() {
        assert_eq!(clean_json_response("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(clean_json_response("```\n[1]\n```"), "[1]");
        assert_eq!(clean_json_response("  {\"a\": 1}  "), "{\"a\": 1}");
        assert_eq!(clean_json_response("```json {\"a\": 1}"), "```json {\"a\": 1}");
    }

    #[test]
    fn test_parse_market_analysis() {
        let analysis = parse_market_analysis(REPLY).unwrap();
        assert_eq!(analysis.market_summary, "Hot US inflation.");
        assert_eq!(analysis.signals.len(), 2);

        let first = &analysis.signals[0];
        assert_eq!(first.direction, Some(TradeDirection::Sell));
        assert_eq!(first.strength, Some(SignalStrength::High));
        assert_eq!(first.confidence_value(), Some(80.0));

        let second = &analysis.signals[1];
        assert_eq!(second.direction, Some(TradeDirection::Buy));
        assert_eq!(second.confidence_value(), Some(55.0));
        assert_eq!(second.rationale, "");
    }

    #[test]
    fn test_parse_keeps_unexpected_entries() {
        let reply = r#"{"market_summary": "Mixed.", "signals": [
            {"pair": "EUR/USD", "direction": "NEUTRAL", "strength": "MEDIUM"},
            {"pair": "GBP/USD", "direction": "SELL", "confidence": "60%"},
            {"pair": "XAU/USD", "direction": null, "strength": "EXTREME"}
        ]}"#;
        let analysis = parse_market_analysis(reply).unwrap();
        assert_eq!(analysis.signals.len(), 3);

        assert_eq!(analysis.signals[0].direction, Some(TradeDirection::Other));
        assert_eq!(analysis.signals[0].strength, Some(SignalStrength::Medium));

        assert_eq!(analysis.signals[1].direction, Some(TradeDirection::Sell));
        assert_eq!(analysis.signals[1].strength, None);

        assert_eq!(analysis.signals[2].direction, None);
        assert_eq!(analysis.signals[2].strength, Some(SignalStrength::Other));
    }

    #[test]
    fn test_parse_rejects_missing_signals() {
        let err = parse_market_analysis(r#"{"market_summary": "x"}"#).unwrap_err();
        assert!(matches!(err, FeedError::InvalidResponse(_)));

        let err = parse_market_analysis(r#"{"signals": {"pair": "EUR/USD"}}"#).unwrap_err();
        assert!(matches!(err, FeedError::InvalidResponse(_)));

        let err = parse_market_analysis("not json at all").unwrap_err();
        assert!(matches!(err, FeedError::InvalidResponse(_)));
    }

    #[test]
    fn test_analysis_prompt_embeds_events() {
        let events = vec![EconomicEvent::new("2024-01-01", "USD", "CPI")
            .with_impact("high")
            .with_readings(Some("3.5%"), Some("3.0%"), None)];
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let prompt = analysis_prompt(&events, today).unwrap();

        assert!(prompt.contains("from today (2024-01-01)"));
        assert!(prompt.contains("\"event\": \"CPI\""));
        assert!(prompt.contains("\"previous\": \"\""));
        assert!(prompt.contains("\"time\": \"\""));
        assert!(!prompt.contains("null"));
        assert!(prompt.contains("\"market_summary\""));
    }
}
