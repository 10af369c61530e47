//! Event pipeline - turns normalized events into enriched signal records

use tracing::debug;

use crate::normalizers::{format_event_datetime, impact_label, normalize_impact, parse_value};
use crate::signals::{
    classify_base, classify_predictive, confidence, deviation_pct, enhance_with_sentiment,
    enhance_with_technical, percent_diff, volatility, PredictiveSignal, SignalConfig,
};
use crate::types::{EconomicEvent, SentimentData, SignalRecord, TechnicalData};

/// Stateless signal pipeline with optional technical/sentiment side inputs.
///
/// Each event is evaluated independently; output order mirrors input order.
#[derive(Debug, Clone, Default)]
pub struct SignalPipeline {
    config: SignalConfig,
    technical: Option<TechnicalData>,
    sentiment: Option<SentimentData>,
}

impl SignalPipeline {
    pub fn new(config: SignalConfig) -> Self {
        Self {
            config,
            technical: None,
            sentiment: None,
        }
    }

    /// Technical indicators keyed by country/currency code
    pub fn with_technical(mut self, technical: TechnicalData) -> Self {
        self.technical = Some(technical);
        self
    }

    /// Sentiment scores keyed by event title
    pub fn with_sentiment(mut self, sentiment: SentimentData) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Evaluate a batch of events
    pub fn run(&self, events: &[EconomicEvent]) -> Vec<SignalRecord> {
        let records: Vec<SignalRecord> = events.iter().map(|e| self.evaluate(e)).collect();
        debug!("Evaluated {} events", records.len());
        records
    }

    /// Evaluate a single event
    pub fn evaluate(&self, event: &EconomicEvent) -> SignalRecord {
        let impact = normalize_impact(event.impact.as_deref());

        let actual = parse_value(event.actual.as_deref());
        let forecast = parse_value(event.forecast.as_deref());
        let previous = parse_value(event.previous.as_deref());

        let diff_forecast = percent_diff(actual, forecast);
        let diff_previous = percent_diff(actual, previous);

        let base_signal = classify_base(
            &self.config.thresholds,
            impact,
            diff_forecast,
            diff_previous,
            actual.is_some(),
            forecast.is_some(),
        );

        let predictive_signal = if actual.is_none() {
            classify_predictive(&self.config.predictive, impact, forecast, previous)
        } else {
            PredictiveSignal::NoPrediction
        };

        let indicators = self
            .technical
            .as_ref()
            .and_then(|t| t.get(&event.country));
        let enhanced_signal = enhance_with_technical(base_signal, indicators);

        let sentiment_score = self
            .sentiment
            .as_ref()
            .and_then(|s| s.get(&event.event))
            .copied();
        let final_signal = enhance_with_sentiment(
            &self.config.lexicon,
            enhanced_signal,
            &event.event,
            sentiment_score,
        );

        SignalRecord {
            date: event.date.clone(),
            time: event.time.clone(),
            formatted_datetime: format_event_datetime(&event.date, event.time.as_deref()),
            country: event.country.clone(),
            event: event.event.clone(),
            impact: impact_label(event.impact.as_deref()),
            actual_raw: event.actual.clone(),
            forecast_raw: event.forecast.clone(),
            previous_raw: event.previous.clone(),
            actual,
            forecast,
            previous,
            base_signal,
            predictive_signal,
            enhanced_signal,
            final_signal,
            volatility: volatility(impact, actual.is_some()),
            confidence: confidence(base_signal, enhanced_signal, final_signal),
            diff_forecast_pct: deviation_pct(actual, forecast),
            diff_previous_pct: deviation_pct(actual, previous),
            source: event.source.clone(),
        }
    }
}
