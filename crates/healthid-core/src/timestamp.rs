//! Serde helpers for timestamps.
//!
//! Timestamps are written as ISO 8601 with millisecond precision and a `Z`
//! suffix (`2024-06-15T10:30:00.000Z`), which is what dashboard consumers
//! parse. Reading accepts any RFC 3339 string.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Format a timestamp the way every collection serializes it.
pub fn format_iso_millis(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a timestamp in various formats.
///
/// Accepts RFC 3339 and date-only `YYYY-MM-DD` (interpreted as UTC midnight).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_iso_millis(dt))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}")))
}

/// Same format for nullable timestamps (`null` when absent).
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        dt: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match dt {
            Some(dt) => serializer.serialize_some(&format_iso_millis(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let value: Option<String> = Option::deserialize(deserializer)?;
        value
            .map(|s| {
                parse_timestamp(&s)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}")))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};

    #[test]
    fn test_format_has_millis_and_z() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        assert_eq!(format_iso_millis(&dt), "2024-06-15T10:30:00.000Z");
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let dt = parse_timestamp("2025-01-20T10:00:00+01:00").unwrap();
        assert_eq!(dt.hour(), 9);
    }

    #[test]
    fn test_parse_date_only() {
        let dt = parse_timestamp("2024-12-31").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 12, 31));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
    }
}
