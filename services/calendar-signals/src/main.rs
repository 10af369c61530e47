use anyhow::{Context, Result};
use calendar_signals::config::Settings;
use calendar_signals::{
    load_sentiment_scores, load_technical_indicators, CalendarApiSource, EventFeed,
    JsonFileSource, SignalPipeline, SignalSummary,
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e).context("Failed to load .env");
        }
    }

    let settings = Settings::load().context("Failed to load settings")?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(settings.tracing_level())
        .init();

    info!("Starting calendar signal run...");

    let mut feed = EventFeed::new();
    feed.add_source(Arc::new(JsonFileSource::new(&settings.input_path)));
    if let Some(url) = &settings.calendar_api_url {
        let api = CalendarApiSource::new(url.as_str())
            .context("Failed to initialize calendar API source")?;
        feed.add_source(Arc::new(api));
        info!("✓ Calendar API source enabled ({})", url);
    }

    let mut events = feed.collect().await.context("Failed to collect events")?;

    if let Some(window) = &settings.window {
        let today = chrono::Local::now().date_naive();
        events = window.apply(events, today);
        info!("{} events inside the date window around {}", events.len(), today);
    }

    let mut pipeline = SignalPipeline::new(settings.signal.clone());
    if let Some(path) = &settings.technical_path {
        let technical = load_technical_indicators(path)
            .await
            .with_context(|| format!("Failed to load technical indicators from {}", path.display()))?;
        pipeline = pipeline.with_technical(technical);
    }
    if let Some(path) = &settings.sentiment_path {
        let sentiment = load_sentiment_scores(path)
            .await
            .with_context(|| format!("Failed to load sentiment scores from {}", path.display()))?;
        pipeline = pipeline.with_sentiment(sentiment);
    }

    let records = pipeline.run(&events);

    let json = serde_json::to_string_pretty(&records).context("Failed to serialize signals")?;
    tokio::fs::write(&settings.output_path, json)
        .await
        .with_context(|| format!("Failed to write {}", settings.output_path.display()))?;

    let summary = SignalSummary::from_records(&records);
    info!(
        "Wrote {} signals to {}",
        summary.total,
        settings.output_path.display()
    );
    info!(
        "Buy: {}, Sell: {}, Neutral: {}, No Signal: {}, Predictive: {}, Volatility alerts: {}",
        summary.buy,
        summary.sell,
        summary.neutral,
        summary.no_signal,
        summary.predictive,
        summary.volatility_alerts
    );

    for health in feed.health_check().await {
        if !health.is_healthy {
            warn!(
                "Source {} unhealthy: {}",
                health.source,
                health.last_error.as_deref().unwrap_or("no successful fetch")
            );
        }
    }

    Ok(())
}
