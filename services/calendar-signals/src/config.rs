// Layered runtime settings: optional `signals.*` file, then SIGNALS_* env vars
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::filters::EventWindow;
use crate::signals::SignalConfig;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Raw event import
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Technical indicators keyed by currency code
    #[serde(default)]
    pub technical_path: Option<PathBuf>,
    /// Sentiment scores keyed by event title
    #[serde(default)]
    pub sentiment_path: Option<PathBuf>,
    /// Base URL of the calendar API; enables the HTTP source when set
    #[serde(default)]
    pub calendar_api_url: Option<String>,
    #[serde(default)]
    pub window: Option<EventWindow>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub signal: SignalConfig,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("data.json")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("enhanced_signals.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
            technical_path: None,
            sentiment_path: None,
            calendar_api_url: None,
            window: None,
            log_level: default_log_level(),
            signal: SignalConfig::default(),
        }
    }
}

impl Settings {
    /// Load `signals.{toml,yaml,json}` if present, overridden by
    /// `SIGNALS_*` env vars (`__` separates nested keys)
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("signals").required(false))
            .add_source(
                Environment::with_prefix("SIGNALS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        config.try_deserialize()
    }

    /// `log_level` as a tracing level, falling back to INFO
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Settings {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap();
        Settings::from_config(config).unwrap()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = from_toml("");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.signal, SignalConfig::default());
        assert_eq!(settings.tracing_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_partial_overrides() {
        let settings = from_toml(
            r#"
            input_path = "events.json"
            calendar_api_url = "http://localhost:8000"
            log_level = "debug"

            [window]
            days_before = 5

            [signal.thresholds.high]
            strong = 12.0
            medium = 4.0

            [signal.lexicon]
            override_threshold = 0.9
            "#,
        );

        assert_eq!(settings.input_path, PathBuf::from("events.json"));
        assert_eq!(settings.output_path, PathBuf::from("enhanced_signals.json"));
        assert_eq!(settings.calendar_api_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(settings.tracing_level(), tracing::Level::DEBUG);

        let window = settings.window.unwrap();
        assert_eq!(window.days_before, 5);
        assert!(window.include_tomorrow);

        assert_eq!(settings.signal.thresholds.high.strong, 12.0);
        assert_eq!(settings.signal.thresholds.low.strong, 3.0);
        assert_eq!(settings.signal.predictive.high, 8.0);
        assert_eq!(settings.signal.lexicon.override_threshold, 0.9);
        assert_eq!(settings.signal.lexicon.signal_threshold, 0.6);
        assert!(settings.signal.lexicon.positive.contains(&"growth".to_string()));
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let settings = from_toml(r#"log_level = "chatty""#);
        assert_eq!(settings.tracing_level(), tracing::Level::INFO);
    }
}
