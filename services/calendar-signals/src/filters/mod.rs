// Calendar date-window selection
use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use tracing::debug;

use crate::types::EconomicEvent;

/// Relative date window around "today".
///
/// Keeps `[today - days_before, today)` plus today and tomorrow when enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EventWindow {
    #[serde(default = "default_days_before")]
    pub days_before: u32,
    #[serde(default = "default_true")]
    pub include_today: bool,
    #[serde(default = "default_true")]
    pub include_tomorrow: bool,
}

fn default_days_before() -> u32 {
    2
}

fn default_true() -> bool {
    true
}

impl Default for EventWindow {
    fn default() -> Self {
        Self {
            days_before: default_days_before(),
            include_today: true,
            include_tomorrow: true,
        }
    }
}

impl EventWindow {
    /// Window covering today only
    pub fn today_only() -> Self {
        Self {
            days_before: 0,
            include_today: true,
            include_tomorrow: false,
        }
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        let start = today
            .checked_sub_signed(Duration::days(i64::from(self.days_before)))
            .unwrap_or(NaiveDate::MIN);
        (date >= start && date < today)
            || (self.include_today && date == today)
            || (self.include_tomorrow && date == today + Duration::days(1))
    }

    /// Keep events inside the window; unparseable dates are dropped
    pub fn apply(&self, events: Vec<EconomicEvent>, today: NaiveDate) -> Vec<EconomicEvent> {
        let before = events.len();
        let kept: Vec<EconomicEvent> = events
            .into_iter()
            .filter(|e| {
                NaiveDate::parse_from_str(e.date.trim(), "%Y-%m-%d")
                    .map(|d| self.contains(d, today))
                    .unwrap_or(false)
            })
            .collect();
        debug!("Date window kept {} of {} events", kept.len(), before);
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn events(dates: &[&str]) -> Vec<EconomicEvent> {
        dates
            .iter()
            .map(|d| EconomicEvent::new(*d, "USD", "CPI"))
            .collect()
    }

    #[test]
    fn test_default_window() {
        let today = day("2024-03-10");
        let kept = EventWindow::default().apply(
            events(&[
                "2024-03-07",
                "2024-03-08",
                "2024-03-09",
                "2024-03-10",
                "2024-03-11",
                "2024-03-12",
                "garbage",
            ]),
            today,
        );
        let dates: Vec<&str> = kept.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-08", "2024-03-09", "2024-03-10", "2024-03-11"]);
    }

    #[test]
    fn test_today_only() {
        let today = day("2024-03-10");
        let window = EventWindow::today_only();
        assert!(window.contains(today, today));
        assert!(!window.contains(day("2024-03-09"), today));
        assert!(!window.contains(day("2024-03-11"), today));
    }

    #[test]
    fn test_window_across_month_boundary() {
        let window = EventWindow {
            days_before: 3,
            include_today: false,
            include_tomorrow: true,
        };
        let today = day("2024-03-01");
        assert!(window.contains(day("2024-02-27"), today));
        assert!(!window.contains(day("2024-02-26"), today));
        assert!(!window.contains(today, today));
        assert!(window.contains(day("2024-03-02"), today));
    }

    #[test]
    fn test_huge_lookback_saturates() {
        let window = EventWindow {
            days_before: u32::MAX,
            include_today: true,
            include_tomorrow: false,
        };
        let today = day("2024-03-10");
        assert!(window.contains(today, today));
        assert!(window.contains(day("1900-01-01"), today));
        assert!(window.contains(NaiveDate::MIN, today));
        assert!(!window.contains(day("2024-03-11"), today));
    }

    #[test]
    fn test_window_deserializes_with_defaults() {
        let window: EventWindow = serde_json::from_str(r#"{"include_tomorrow": false}"#).unwrap();
        assert_eq!(window.days_before, 2);
        assert!(window.include_today);
        assert!(!window.include_tomorrow);
    }
}
