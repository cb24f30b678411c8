//! Shared formatting utilities for the FrameSync views.

use chrono::{TimeZone, Utc};

/// Format a numeric value for display with appropriate scale suffix.
///
/// - Values >= 1M display as "X.XM"
/// - Values >= 1K display as "X.XK"
/// - Integer values display without decimal places
/// - Other values display with 2 decimal places
pub fn format_value(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Format a value together with its unit, e.g. "12.50 km/h".
pub fn format_reading(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        format_value(value)
    } else {
        format!("{} {}", format_value(value), unit)
    }
}

/// Format Unix epoch milliseconds as a UTC wall clock time ("HH:MM:SS").
pub fn format_clock(timestamp_ms: i64) -> String {
    match Utc.timestamp_millis_opt(timestamp_ms).single() {
        Some(instant) => instant.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

/// Format a time span for axis and header labels.
///
/// Returns strings like "850ms", "30s", "5m 10s", "2h 3m".
pub fn format_span(span_ms: i64) -> String {
    let span_ms = span_ms.max(0);
    if span_ms < 1000 {
        format!("{}ms", span_ms)
    } else if span_ms < 60_000 {
        format!("{}s", span_ms / 1000)
    } else if span_ms < 3_600_000 {
        format!("{}m {}s", span_ms / 60_000, (span_ms % 60_000) / 1000)
    } else {
        format!("{}h {}m", span_ms / 3_600_000, (span_ms % 3_600_000) / 60_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(42.0), "42");
        assert_eq!(format_value(3.14159), "3.14");
        assert_eq!(format_value(1500.0), "1.5K");
        assert_eq!(format_value(2500000.0), "2.5M");
        assert_eq!(format_value(-1500.0), "-1.5K");
    }

    #[test]
    fn test_format_reading() {
        assert_eq!(format_reading(12.5, "km/h"), "12.50 km/h");
        assert_eq!(format_reading(3.0, ""), "3");
    }

    #[test]
    fn test_format_clock() {
        // 2024-01-01T00:00:10Z
        assert_eq!(format_clock(1_704_067_210_000), "00:00:10");
        assert_eq!(format_clock(i64::MAX), "--:--:--");
    }

    #[test]
    fn test_format_span() {
        assert_eq!(format_span(850), "850ms");
        assert_eq!(format_span(30_000), "30s");
        assert_eq!(format_span(310_000), "5m 10s");
        assert_eq!(format_span(7_380_000), "2h 3m");
        assert_eq!(format_span(-5), "0ms");
    }
}
