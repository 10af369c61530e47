use crate::sources::health::HealthTracker;
use crate::types::*;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Raw import payload: a bare array or the `{status, data}` envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EventPayload {
    Bare(Vec<EconomicEvent>),
    Envelope { data: Vec<EconomicEvent> },
}

impl EventPayload {
    fn into_events(self) -> Vec<EconomicEvent> {
        match self {
            EventPayload::Bare(events) => events,
            EventPayload::Envelope { data } => data,
        }
    }
}

/// Event source backed by a JSON import file (e.g. `data.json`)
pub struct JsonFileSource {
    name: String,
    path: PathBuf,
    health_tracker: HealthTracker,
    last_error: Mutex<Option<String>>,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self {
            name,
            path,
            health_tracker: HealthTracker::new(),
            last_error: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_events(&self) -> Result<Vec<EconomicEvent>> {
        let payload: EventPayload = read_json(&self.path).await?;
        Ok(payload.into_events())
    }
}

#[async_trait]
impl EventSource for JsonFileSource {
    async fn fetch_events(&self) -> Result<Vec<EconomicEvent>> {
        let start = Instant::now();
        match self.read_events().await {
            Ok(events) => {
                self.health_tracker
                    .record_success(start.elapsed().as_millis() as u64);
                *self.last_error.lock().await = None;
                info!("Loaded {} events from {}", events.len(), self.path.display());
                Ok(events)
            }
            Err(e) => {
                self.health_tracker.record_failure();
                *self.last_error.lock().await = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn health(&self) -> SourceHealth {
        let last_error = self.last_error.lock().await.clone();
        self.health_tracker.snapshot(&self.name, last_error)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = tokio::fs::read_to_string(path).await?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    serde_json::from_str(&text).map_err(|e| {
        FeedError::InvalidResponse(format!("{}: {}", path.display(), e))
    })
}

/// Load technical indicators keyed by country/currency code
pub async fn load_technical_indicators(path: impl AsRef<Path>) -> Result<TechnicalData> {
    let data: TechnicalData = read_json(path.as_ref()).await?;
    info!("Loaded technical indicators for {} codes", data.len());
    Ok(data)
}

/// Load sentiment scores keyed by event title
pub async fn load_sentiment_scores(path: impl AsRef<Path>) -> Result<SentimentData> {
    let data: SentimentData = read_json(path.as_ref()).await?;
    info!("Loaded sentiment scores for {} events", data.len());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_reads_bare_array() {
        let file = temp_json(
            r#"[{"date": "2024-01-01", "country": "USD", "event": "CPI", "actual": "3.5%"}]"#,
        );
        let source = JsonFileSource::new(file.path());
        let events = source.fetch_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].actual.as_deref(), Some("3.5%"));
        assert!(source.health().await.is_healthy);
    }

    #[tokio::test]
    async fn test_reads_envelope() {
        let file = temp_json(
            r#"{"status": "success", "data": [
                {"date": "2024-01-01", "country": "USD", "event": "CPI"},
                {"date": "2024-01-01", "country": "EUR", "event": "GDP", "forecast": 0.3}
            ]}"#,
        );
        let events = JsonFileSource::new(file.path()).fetch_events().await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].forecast.as_deref(), Some("0.3"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("missing.json"));
        let err = source.fetch_events().await.unwrap_err();
        assert!(matches!(err, FeedError::Io(_)));

        let health = source.health().await;
        assert!(!health.is_healthy);
        assert!(health.last_error.is_some());
    }

    #[tokio::test]
    async fn test_malformed_file_is_invalid_response() {
        let file = temp_json(r#"{"data": "nope"}"#);
        let err = JsonFileSource::new(file.path()).fetch_events().await.unwrap_err();
        assert!(matches!(err, FeedError::InvalidResponse(_)));
    }

    #[test]
    fn test_side_input_loaders() {
        let technical = temp_json(r#"{"USD": {"trend": "Bullish", "rsi": 61}, "EUR": {}}"#);
        let sentiment = temp_json(r#"{"CPI": -0.9, "GDP Growth Rate": 0.4}"#);

        let technical = tokio_test::block_on(load_technical_indicators(technical.path())).unwrap();
        assert_eq!(technical["USD"].trend, Some(Trend::Bullish));
        assert_eq!(technical["EUR"].trend, None);

        let sentiment = tokio_test::block_on(load_sentiment_scores(sentiment.path())).unwrap();
        assert_eq!(sentiment["CPI"], -0.9);
    }
}
