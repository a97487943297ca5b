//! Display formatters
//!
//! Pure, total functions: they never return an error and never panic on
//! input data. Missing or unparseable values degrade to a sentinel (or an
//! empty string for dates/durations), never to zero.

use chrono::NaiveDate;
use regex::Regex;

/// Sentinel shown for missing or unparseable metric fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Rate classification band, also the CSS badge class in rendered HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateBand {
    High,
    Medium,
    Low,
}

impl RateBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateBand::High => "high",
            RateBand::Medium => "medium",
            RateBand::Low => "low",
        }
    }
}

impl std::fmt::Display for RateBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification cutoffs: at or above `high` is High, at or above
/// `medium` is Medium, else Low.
#[derive(Debug, Clone, Copy)]
pub struct RateThresholds {
    pub high: f64,
    pub medium: f64,
}

/// Engagement-rate cutoffs (percent).
pub const ENGAGEMENT_THRESHOLDS: RateThresholds = RateThresholds {
    high: 3.5,
    medium: 2.0,
};

/// Retention-rate cutoffs (percent).
pub const RETENTION_THRESHOLDS: RateThresholds = RateThresholds {
    high: 30.0,
    medium: 20.0,
};

pub fn classify_rate(rate: f64, thresholds: RateThresholds) -> RateBand {
    if rate >= thresholds.high {
        RateBand::High
    } else if rate >= thresholds.medium {
        RateBand::Medium
    } else {
        RateBand::Low
    }
}

/// Half-up rounding to one fractional digit.
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Magnitude-suffixed rendering: 2_300_000 -> "2.3M", 1_500 -> "1.5K",
/// 999 -> "999".
pub fn format_compact_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", round1(n as f64 / 1_000_000.0))
    } else if n >= 1_000 {
        format!("{:.1}K", round1(n as f64 / 1_000.0))
    } else {
        n.to_string()
    }
}

/// Percentage rendering to one decimal, e.g. 3.0 -> "3.0%".
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", round1(rate))
}

/// "Mon D, YYYY" rendering of an ISO date or RFC 3339 timestamp.
/// Malformed input yields an empty string.
pub fn format_date(iso: &str) -> String {
    let date = chrono::DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(iso, "%Y-%m-%d"))
        .or_else(|_| NaiveDate::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S"));
    match date {
        Ok(d) => d.format("%b %-d, %Y").to_string(),
        Err(_) => String::new(),
    }
}

/// Clock rendering of the `PT[H][M][S]` subset of ISO-8601 durations:
/// "PT1H2M3S" -> "1:02:03", "PT22M57S" -> "22:57". Malformed input yields
/// an empty string.
pub fn format_duration(duration: &str) -> String {
    let re = match Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$") {
        Ok(re) => re,
        Err(_) => return String::new(),
    };
    let caps = match re.captures(duration.trim()) {
        Some(caps) => caps,
        None => return String::new(),
    };

    let part = |i: usize| -> u64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    let hours = part(1);
    let minutes = part(2);
    let seconds = part(3);

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Best-effort parse of the leading decimal number in a string, used for
/// percentage fields like "2.4%". Returns None when nothing parses.
pub fn parse_leading_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    let prefix: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-' || *c == '+')
        .collect();
    prefix.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_compact_number_plain() {
        assert_eq!(format_compact_number(0), "0");
        assert_eq!(format_compact_number(999), "999");
    }

    #[test]
    fn test_format_compact_number_thousands() {
        assert_eq!(format_compact_number(1_500), "1.5K");
        assert_eq!(format_compact_number(1_000), "1.0K");
        assert_eq!(format_compact_number(999_999), "1000.0K");
    }

    #[test]
    fn test_format_compact_number_millions() {
        assert_eq!(format_compact_number(2_300_000), "2.3M");
        assert_eq!(format_compact_number(1_000_000), "1.0M");
    }

    #[test]
    fn test_format_compact_number_half_up() {
        // 1.25M rounds up, not to even.
        assert_eq!(format_compact_number(1_250_000), "1.3M");
        assert_eq!(format_compact_number(1_150_000), "1.2M");
    }

    #[test]
    fn test_classify_engagement() {
        assert_eq!(classify_rate(3.5, ENGAGEMENT_THRESHOLDS), RateBand::High);
        assert_eq!(classify_rate(4.2, ENGAGEMENT_THRESHOLDS), RateBand::High);
        assert_eq!(classify_rate(2.0, ENGAGEMENT_THRESHOLDS), RateBand::Medium);
        assert_eq!(classify_rate(1.9, ENGAGEMENT_THRESHOLDS), RateBand::Low);
        assert_eq!(classify_rate(0.0, ENGAGEMENT_THRESHOLDS), RateBand::Low);
    }

    #[test]
    fn test_classify_retention() {
        assert_eq!(classify_rate(30.0, RETENTION_THRESHOLDS), RateBand::High);
        assert_eq!(classify_rate(20.0, RETENTION_THRESHOLDS), RateBand::Medium);
        assert_eq!(classify_rate(19.9, RETENTION_THRESHOLDS), RateBand::Low);
    }

    #[test]
    fn test_rate_band_css_class() {
        assert_eq!(RateBand::High.to_string(), "high");
        assert_eq!(RateBand::Low.as_str(), "low");
    }

    #[test]
    fn test_format_date_rfc3339() {
        assert_eq!(format_date("2024-01-05T10:30:00Z"), "Jan 5, 2024");
        assert_eq!(format_date("2023-12-25T00:00:00+02:00"), "Dec 25, 2023");
    }

    #[test]
    fn test_format_date_bare() {
        assert_eq!(format_date("2024-11-09"), "Nov 9, 2024");
    }

    #[test]
    fn test_format_date_malformed() {
        assert_eq!(format_date("not a date"), "");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_format_duration_minutes_seconds() {
        assert_eq!(format_duration("PT22M57S"), "22:57");
        assert_eq!(format_duration("PT4M3S"), "4:03");
    }

    #[test]
    fn test_format_duration_with_hours() {
        assert_eq!(format_duration("PT1H2M3S"), "1:02:03");
        assert_eq!(format_duration("PT2H0M0S"), "2:00:00");
    }

    #[test]
    fn test_format_duration_partial_components() {
        assert_eq!(format_duration("PT45S"), "0:45");
        assert_eq!(format_duration("PT7M"), "7:00");
        assert_eq!(format_duration("PT1H"), "1:00:00");
        // All components optional upstream; a bare PT is a zero duration.
        assert_eq!(format_duration("PT"), "0:00");
    }

    #[test]
    fn test_format_duration_malformed() {
        assert_eq!(format_duration("garbage"), "");
        assert_eq!(format_duration(""), "");
        assert_eq!(format_duration("P1DT2H"), "");
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("2.0%"), Some(2.0));
        assert_eq!(parse_leading_number("  34.7% retention"), Some(34.7));
        assert_eq!(parse_leading_number("12"), Some(12.0));
        assert_eq!(parse_leading_number("-1.5%"), Some(-1.5));
        assert_eq!(parse_leading_number("N/A"), None);
        assert_eq!(parse_leading_number(""), None);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(3.0), "3.0%");
        assert_eq!(format_percent(2.75), "2.8%");
    }
}
