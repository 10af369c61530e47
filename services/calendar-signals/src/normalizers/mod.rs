// Normalization logic for loosely-typed calendar fields
use crate::types::Impact;
use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

/// Currency codes stripped from readings like "USD 1.2B"
static CURRENCY_CODES: phf::Set<&'static str> = phf::phf_set! {
    "USD", "EUR", "GBP", "JPY", "CNY", "THB", "ILS", "CAD", "AUD", "NZD", "CHF", "INR",
};

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// Impact labels seen across calendar sources
static IMPACT_ALIASES: phf::Map<&'static str, Impact> = phf::phf_map! {
    "high" => Impact::High,
    "h" => Impact::High,
    "3" => Impact::High,
    "red" => Impact::High,
    "medium" => Impact::Medium,
    "m" => Impact::Medium,
    "med" => Impact::Medium,
    "2" => Impact::Medium,
    "orange" => Impact::Medium,
    "ora" => Impact::Medium,
    "low" => Impact::Low,
    "l" => Impact::Low,
    "1" => Impact::Low,
    "yellow" => Impact::Low,
    "yel" => Impact::Low,
};

/// Parse a free-form indicator reading ("1.2%", "€3.4B", "JPY-0.5K") into a magnitude.
///
/// Percent readings stay in percentage points: "3.5%" and "3.5" both parse to 3.5,
/// which is the unit the signal thresholds are expressed in.
/// Anything that does not reduce to a finite number yields `None`.
pub fn parse_value(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    let mut value = raw.trim().to_uppercase().replace(',', "").replace('%', "");

    let leading_code = value.len() >= 3 && value.as_bytes()[..3].iter().all(u8::is_ascii_uppercase);
    if leading_code {
        value = value[3..].to_string();
    } else {
        value.retain(|c| !CURRENCY_SYMBOLS.contains(&c));
        for code in CURRENCY_CODES.iter() {
            value = value.replace(code, "");
        }
    }

    let value = value.trim();
    let (number, multiplier) = if let Some(n) = value.strip_suffix('B') {
        (n, 1e9)
    } else if let Some(n) = value.strip_suffix('M') {
        (n, 1e6)
    } else if let Some(n) = value.strip_suffix('K') {
        (n, 1e3)
    } else {
        (value, 1.0)
    };

    match number.trim().parse::<f64>().map(|n| n * multiplier) {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            if !raw.trim().is_empty() {
                debug!("Could not parse reading '{}'", raw);
            }
            None
        }
    }
}

/// Map a raw impact label onto a tier.
/// Handles CashbackForex class names such as "ec-fx-impact-high".
pub fn normalize_impact(raw: Option<&str>) -> Option<Impact> {
    let label = raw?.trim().to_lowercase();
    let label = label.strip_prefix("ec-fx-impact-").unwrap_or(&label);
    IMPACT_ALIASES.get(label).copied()
}

/// Output label for an impact field: the tier name when recognized,
/// otherwise the lowercased raw text.
pub fn impact_label(raw: Option<&str>) -> Option<String> {
    match normalize_impact(raw) {
        Some(impact) => Some(impact.as_str().to_string()),
        None => raw
            .map(|r| r.trim().to_lowercase())
            .filter(|r| !r.is_empty()),
    }
}

/// Combine calendar date and time into "YYYY-MM-DD HH:MM".
///
/// Falls back to the date alone when the time is missing or not a clock time
/// ("All Day", "Tentative"), and to the raw date when it isn't ISO formatted.
pub fn format_event_datetime(date: &str, time: Option<&str>) -> Option<String> {
    if date.is_empty() {
        return None;
    }

    let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return Some(date.to_string());
    };
    let formatted_date = day.format("%Y-%m-%d").to_string();

    if let Some(time) = time.filter(|t| !t.is_empty()) {
        let time = time.replace("am", " AM").replace("pm", " PM");
        for fmt in ["%H:%M", "%I:%M %p", "%I:%M%p"] {
            if let Ok(t) = NaiveTime::parse_from_str(&time, fmt) {
                return Some(format!("{} {}", formatted_date, t.format("%H:%M")));
            }
        }
    }

    Some(formatted_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.map(|v| (v - b).abs() < 1e-9 * b.abs().max(1.0)).unwrap_or(false)
    }

    #[test]
    fn test_parse_percentages_stay_in_points() {
        assert!(approx(parse_value(Some("1.2%")), 1.2));
        assert!(approx(parse_value(Some("-0.3%")), -0.3));
        assert!(approx(parse_value(Some(" 3.5 ")), 3.5));
    }

    #[test]
    fn test_parse_currency_and_magnitude() {
        assert!(approx(parse_value(Some("€3.4B")), 3.4e9));
        assert!(approx(parse_value(Some("$250K")), 250_000.0));
        assert!(approx(parse_value(Some("JPY-0.5K")), -500.0));
        assert!(approx(parse_value(Some("usd 1.5m")), 1.5e6));
        assert!(approx(parse_value(Some("1,234.5")), 1234.5));
        assert!(approx(parse_value(Some("12.3 CAD")), 12.3));
    }

    #[test]
    fn test_parse_absent_and_garbage() {
        assert_eq!(parse_value(None), None);
        assert_eq!(parse_value(Some("")), None);
        assert_eq!(parse_value(Some("   ")), None);
        assert_eq!(parse_value(Some("%")), None);
        assert_eq!(parse_value(Some("$")), None);
        assert_eq!(parse_value(Some("K")), None);
        assert_eq!(parse_value(Some("n/a")), None);
        assert_eq!(parse_value(Some("NaN")), None);
    }

    #[test]
    fn test_parse_rejects_overflowing_magnitude() {
        assert_eq!(parse_value(Some("1E300B")), None);
        assert_eq!(parse_value(Some("-1e306K")), None);
        assert!(approx(parse_value(Some("1E300")), 1e300));
    }

    #[test]
    fn test_parse_zero_is_not_absent() {
        assert_eq!(parse_value(Some("0.0%")), Some(0.0));
        assert_eq!(parse_value(Some("0")), Some(0.0));
    }

    #[test]
    fn test_normalize_impact_aliases() {
        assert_eq!(normalize_impact(Some("High")), Some(Impact::High));
        assert_eq!(normalize_impact(Some("red")), Some(Impact::High));
        assert_eq!(normalize_impact(Some("ORA")), Some(Impact::Medium));
        assert_eq!(normalize_impact(Some("yel")), Some(Impact::Low));
        assert_eq!(normalize_impact(Some("ec-fx-impact-medium")), Some(Impact::Medium));
        assert_eq!(normalize_impact(Some("holiday")), None);
        assert_eq!(normalize_impact(None), None);
    }

    #[test]
    fn test_impact_label_keeps_unknown_text() {
        assert_eq!(impact_label(Some("H")), Some("high".to_string()));
        assert_eq!(impact_label(Some("Holiday")), Some("holiday".to_string()));
        assert_eq!(impact_label(Some("")), None);
        assert_eq!(impact_label(None), None);
    }

    #[test]
    fn test_format_event_datetime() {
        assert_eq!(
            format_event_datetime("2024-01-01", Some("08:30")),
            Some("2024-01-01 08:30".to_string())
        );
        assert_eq!(
            format_event_datetime("2024-01-01", Some("1:45pm")),
            Some("2024-01-01 13:45".to_string())
        );
        assert_eq!(
            format_event_datetime("2024-01-01", Some("All Day")),
            Some("2024-01-01".to_string())
        );
        assert_eq!(format_event_datetime("2024-01-01", None), Some("2024-01-01".to_string()));
        assert_eq!(format_event_datetime("Jan 1", Some("08:30")), Some("Jan 1".to_string()));
        assert_eq!(format_event_datetime("", Some("08:30")), None);
    }
}
