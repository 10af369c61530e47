pub mod types;
pub mod sources {
    pub mod calendar_api;
    pub mod health;
    pub mod json_file;
}
pub mod aggregators;
pub mod analysis;
pub mod config;
pub mod filters;
pub mod normalizers;
pub mod pipeline;
pub mod signals;

pub use aggregators::SignalSummary;
pub use filters::EventWindow;
pub use pipeline::SignalPipeline;
pub use signals::SignalConfig;
pub use sources::calendar_api::{CalendarApiSource, CalendarQuery};
pub use sources::json_file::{load_sentiment_scores, load_technical_indicators, JsonFileSource};
pub use types::*;

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Multi-source event collector.
///
/// Merges every source into one de-duplicated event list keyed by
/// `EconomicEvent::event_id`.
#[derive(Default)]
pub struct EventFeed {
    sources: Vec<Arc<dyn EventSource>>,
}

impl EventFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(&mut self, source: Arc<dyn EventSource>) {
        self.sources.push(source);
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Fetch all sources concurrently and merge their events.
    ///
    /// Failed sources are logged and skipped. Events missing a date, country
    /// or title are dropped. A later source's copy of an event replaces the
    /// earlier one in place, so output keeps first-seen order.
    pub async fn collect(&self) -> Result<Vec<EconomicEvent>> {
        if self.sources.is_empty() {
            return Err(FeedError::SourceUnhealthy(
                "No event sources configured".to_string(),
            ));
        }

        let futures = self.sources.iter().map(|s| s.fetch_events());
        let results = futures::future::join_all(futures).await;

        let mut batches = Vec::new();
        for (source, result) in self.sources.iter().zip(results) {
            match result {
                Ok(events) => batches.push(events),
                Err(e) => warn!("Source {} failed: {}", source.name(), e),
            }
        }

        if batches.is_empty() {
            return Err(FeedError::SourceUnhealthy(
                "All sources failed".to_string(),
            ));
        }

        let mut merged: Vec<EconomicEvent> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut skipped = 0usize;

        for event in batches.into_iter().flatten() {
            if !event.is_usable() {
                skipped += 1;
                continue;
            }
            match positions.get(&event.event_id()) {
                Some(&idx) => merged[idx] = event,
                None => {
                    positions.insert(event.event_id(), merged.len());
                    merged.push(event);
                }
            }
        }

        if skipped > 0 {
            debug!("Skipped {} events missing date, country or title", skipped);
        }
        info!(
            "Collected {} events from {} sources",
            merged.len(),
            self.sources.len()
        );

        Ok(merged)
    }

    /// Get health status of all sources
    pub async fn health_check(&self) -> Vec<SourceHealth> {
        let mut healths = Vec::new();
        for source in &self.sources {
            healths.push(source.health().await);
        }
        healths
    }
}
