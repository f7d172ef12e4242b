//! Reference time ("now") parsing.

use anyhow::Context;
use chrono::{DateTime, Datelike, SubsecRound, Utc};
use healthid_core::timestamp::parse_timestamp;

/// Accepted reference years. Generated dates reach up to a century before
/// "now" and a few months after it, and every one of them must still format
/// as a four-digit RFC 3339 year.
pub const REFERENCE_YEARS: std::ops::RangeInclusive<i32> = 1900..=9998;

/// Parse a reference time like "2025-06-01T12:00:00Z" or "2025-06-01".
/// Supports:
/// - RFC 3339 with any offset: "2025-06-01T14:00:00+02:00"
/// - Date only, taken as UTC midnight: "2025-06-01"
///
/// Sub-millisecond precision is dropped so the value survives a round trip
/// through the exported manifest.
pub fn parse_reference_time(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty reference time");
    }
    let dt = parse_timestamp(s)
        .map(|dt| dt.trunc_subsecs(3))
        .with_context(|| format!("Invalid reference time '{s}': expected RFC 3339 or YYYY-MM-DD"))?;
    if !REFERENCE_YEARS.contains(&dt.year()) {
        anyhow::bail!(
            "Invalid reference time '{s}': year must be between {} and {}",
            REFERENCE_YEARS.start(),
            REFERENCE_YEARS.end()
        );
    }
    Ok(dt)
}

/// The current wall-clock time at millisecond precision.
pub fn wall_clock() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        assert_eq!(
            parse_reference_time("2025-06-01T14:00:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_date_only() {
        assert_eq!(
            parse_reference_time(" 2025-06-01 ").unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_sub_millisecond_precision_dropped() {
        let dt = parse_reference_time("2025-06-01T00:00:00.123456789Z").unwrap();
        assert_eq!(dt.nanosecond(), 123_000_000);
        assert_eq!(wall_clock().nanosecond() % 1_000_000, 0);
    }

    #[test]
    fn test_invalid_reference_time() {
        assert!(parse_reference_time("").is_err());
        assert!(parse_reference_time("yesterday").is_err());
        assert!(parse_reference_time("2025-13-01").is_err());
    }

    #[test]
    fn test_year_outside_four_digits_rejected() {
        let err = parse_reference_time("9999-12-31").unwrap_err();
        assert!(err.to_string().contains("year must be between"));
        assert!(parse_reference_time("+10000-01-01").is_err());
        assert!(parse_reference_time("1899-12-31T23:59:59Z").is_err());
        assert!(parse_reference_time("9998-06-01").is_ok());
    }
}
