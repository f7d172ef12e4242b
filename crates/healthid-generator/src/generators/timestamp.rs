//! Timestamp generators and calendar offsets relative to a reference time.

use crate::prng::next_float;
use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use rand::RngCore;

/// Epoch milliseconds drawn linearly between `start` and `end`, one draw.
///
/// Kept fractional; [`from_epoch_millis`] truncates when the value becomes a
/// timestamp.
pub fn random_epoch_millis<R: RngCore + ?Sized>(
    rng: &mut R,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> f64 {
    let start_ms = start.timestamp_millis() as f64;
    let end_ms = end.timestamp_millis() as f64;
    start_ms + next_float(rng) * (end_ms - start_ms)
}

/// Truncate fractional epoch milliseconds to a timestamp.
///
/// Falls back to `fallback` if the value is outside chrono's range.
pub fn from_epoch_millis(ms: f64, fallback: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms.trunc() as i64).unwrap_or(fallback)
}

/// Random timestamp in `[start, end]` at millisecond precision, one draw.
///
/// If `start >= end` the result is `start` (the draw is still consumed).
pub fn random_date<R: RngCore + ?Sized>(
    rng: &mut R,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let ms = random_epoch_millis(rng, start, end);
    if start >= end {
        return start;
    }
    from_epoch_millis(ms, start)
}

/// `now` shifted back by whole calendar months, clamped to month end.
pub fn months_before(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months)).unwrap_or(now)
}

/// `at` shifted by a signed number of whole days.
///
/// Saturates at `at` if the result is outside chrono's range.
pub fn days_offset(at: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(at)
}

/// The UTC calendar date `days` before `now`.
pub fn date_days_before(now: DateTime<Utc>, days: u32) -> NaiveDate {
    days_offset(now, -i64::from(days)).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::{ConstantStream, Mulberry32};
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_random_date_in_range() {
        let mut rng = Mulberry32::new(42);
        let start = at(2025, 1, 1);
        let end = at(2025, 12, 31);
        for _ in 0..1000 {
            let dt = random_date(&mut rng, start, end);
            assert!(dt >= start && dt <= end);
        }
    }

    #[test]
    fn test_random_date_midpoint() {
        let mut rng = ConstantStream::from_fraction(0.5);
        let start = at(2025, 1, 1);
        let end = at(2025, 1, 3);
        assert_eq!(random_date(&mut rng, start, end), at(2025, 1, 2));
    }

    #[test]
    fn test_random_date_empty_range() {
        let mut rng = Mulberry32::new(1);
        let start = at(2025, 6, 1);
        assert_eq!(random_date(&mut rng, start, start), start);
    }

    #[test]
    fn test_random_date_truncates_to_millis() {
        let mut rng = Mulberry32::new(5555);
        let dt = random_date(&mut rng, at(2025, 1, 1), at(2025, 2, 1));
        assert_eq!(dt.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn test_months_before_clamps_to_month_end() {
        let now = Utc.with_ymd_and_hms(2025, 8, 31, 9, 30, 0).unwrap();
        let back = months_before(now, 6);
        assert_eq!(back, Utc.with_ymd_and_hms(2025, 2, 28, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_days_offset_and_date() {
        let now = at(2025, 3, 1);
        assert_eq!(days_offset(now, -1), at(2025, 2, 28));
        assert_eq!(days_offset(now, 30), at(2025, 3, 31));
        assert_eq!(
            date_days_before(now, 180),
            NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
        );
    }

    #[test]
    fn test_days_offset_out_of_range_keeps_reference() {
        let now = at(2025, 3, 1);
        assert_eq!(days_offset(now, -120_000_000), now);
        assert_eq!(days_offset(now, i64::MAX), now);
        assert_eq!(date_days_before(now, u32::MAX), now.date_naive());
    }
}
