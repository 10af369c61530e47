use crate::sources::health::HealthTracker;
use crate::types::*;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

/// Optional filters for `GET /events`; list filters repeat the query key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub countries: Vec<String>,
    pub impact: Vec<String>,
    pub sources: Vec<String>,
}

impl CalendarQuery {
    pub fn between(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Default::default()
        }
    }

    fn apply(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        if let Some(d) = self.start_date {
            pairs.append_pair("start_date", &d.format("%Y-%m-%d").to_string());
        }
        if let Some(d) = self.end_date {
            pairs.append_pair("end_date", &d.format("%Y-%m-%d").to_string());
        }
        for country in &self.countries {
            pairs.append_pair("countries", country);
        }
        for impact in &self.impact {
            pairs.append_pair("impact", impact);
        }
        for source in &self.sources {
            pairs.append_pair("sources", source);
        }
    }
}

/// `{status, data}` on success, `{status: "error", message, details}` on failure
#[derive(Debug, Deserialize)]
struct EventsResponse {
    status: String,
    #[serde(default)]
    data: Vec<EconomicEvent>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Client for the economic calendar HTTP API
pub struct CalendarApiSource {
    client: Client,
    base_url: String,
    query: CalendarQuery,
    health_tracker: HealthTracker,
    last_error: Mutex<Option<String>>,
}

impl CalendarApiSource {
    const REQUEST_TIMEOUT_SECS: u64 = 10;

    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| FeedError::ApiError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            query: CalendarQuery::default(),
            health_tracker: HealthTracker::new(),
            last_error: Mutex::new(None),
        })
    }

    pub fn with_query(mut self, query: CalendarQuery) -> Self {
        self.query = query;
        self
    }

    /// Full request URL including query filters
    pub fn events_url(&self, query: &CalendarQuery) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/events", self.base_url))
            .map_err(|e| FeedError::ApiError(format!("Invalid calendar API URL: {}", e)))?;
        query.apply(&mut url);
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    /// Fetch events matching `query`
    pub async fn fetch_with_query(&self, query: &CalendarQuery) -> Result<Vec<EconomicEvent>> {
        let result = self.request_events(query).await;
        match &result {
            Ok(events) => {
                *self.last_error.lock().await = None;
                info!("Calendar API returned {} events", events.len());
            }
            Err(e) => {
                self.health_tracker.record_failure();
                *self.last_error.lock().await = Some(e.to_string());
            }
        }
        result
    }

    async fn request_events(&self, query: &CalendarQuery) -> Result<Vec<EconomicEvent>> {
        let url = self.events_url(query)?;
        debug!("GET {}", url);
        let request_start = Instant::now();

        let response = match tokio::time::timeout(
            Duration::from_secs(Self::REQUEST_TIMEOUT_SECS),
            self.client.get(url).send(),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => return Err(FeedError::ApiError(e.to_string())),
            Err(_) => {
                return Err(FeedError::ApiError(format!(
                    "Calendar API request timed out after {}s",
                    Self::REQUEST_TIMEOUT_SECS
                )))
            }
        };

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            warn!("Calendar API rate limited (retry after {:?}s)", retry_after);
            return Err(FeedError::RateLimit {
                source_name: self.name().to_string(),
                retry_after,
            });
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(FeedError::ApiError(format!(
                "Calendar API error ({}): {}",
                status, text
            )));
        }

        let body: EventsResponse = response
            .json()
            .await
            .map_err(|e| FeedError::InvalidResponse(e.to_string()))?;

        if body.status != "success" {
            let message = body.message.unwrap_or_else(|| "unknown error".to_string());
            return Err(FeedError::ApiError(match body.details {
                Some(details) => format!("{}: {}", message, details),
                None => message,
            }));
        }

        self.health_tracker
            .record_success(request_start.elapsed().as_millis() as u64);
        Ok(body.data)
    }
}

#[async_trait]
impl EventSource for CalendarApiSource {
    async fn fetch_events(&self) -> Result<Vec<EconomicEvent>> {
        self.fetch_with_query(&self.query).await
    }

    async fn health(&self) -> SourceHealth {
        let last_error = self.last_error.lock().await.clone();
        self.health_tracker.snapshot(self.name(), last_error)
    }

    fn name(&self) -> &str {
        "calendar_api"
    }
}
