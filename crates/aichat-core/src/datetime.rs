//! Timestamp formatting for message cards.
//!
//! Dates are rendered month/day in the fixed `M月d日` form and times as
//! 24-hour `HH:mm`. Out-of-range timestamps format as an empty string.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

const DATE_ONLY: &str = "%-m月%-d日";
const TIME_ONLY: &str = "%H:%M";

pub fn format_date_only(epoch_ms: i64) -> String {
    format_date_only_in(epoch_ms, &Local)
}

pub fn format_time_only(epoch_ms: i64) -> String {
    format_time_only_in(epoch_ms, &Local)
}

pub fn format_date_only_in<Tz>(epoch_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_in(epoch_ms, tz, DATE_ONLY)
}

pub fn format_time_only_in<Tz>(epoch_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format_in(epoch_ms, tz, TIME_ONLY)
}

fn format_in<Tz>(epoch_ms: i64, tz: &Tz, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(utc) => utc.with_timezone(tz).format(pattern).to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    // 2024-01-01T04:45:00Z
    const NEW_YEAR_MORNING: i64 = 1_704_084_300_000;

    #[test]
    fn test_date_only_unpadded() {
        assert_eq!(format_date_only_in(NEW_YEAR_MORNING, &Utc), "1月1日");
    }

    #[test]
    fn test_time_only_24_hour() {
        assert_eq!(format_time_only_in(NEW_YEAR_MORNING, &Utc), "04:45");

        let jst = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_time_only_in(NEW_YEAR_MORNING, &jst), "13:45");
    }

    #[test]
    fn test_offset_can_change_the_day() {
        // 2024-12-31T23:30:00Z is already New Year's Day at +09:00
        let ts = 1_735_687_800_000;
        let jst = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(format_date_only_in(ts, &Utc), "12月31日");
        assert_eq!(format_date_only_in(ts, &jst), "1月1日");
        assert_eq!(format_time_only_in(ts, &jst), "08:30");
    }

    #[test]
    fn test_epoch_zero() {
        assert_eq!(format_date_only_in(0, &Utc), "1月1日");
        assert_eq!(format_time_only_in(0, &Utc), "00:00");
    }

    #[test]
    fn test_out_of_range_is_empty() {
        assert_eq!(format_date_only_in(i64::MAX, &Utc), "");
        assert_eq!(format_time_only_in(i64::MIN, &Utc), "");
    }

    #[test]
    fn test_local_variants_produce_output() {
        assert!(!format_date_only(NEW_YEAR_MORNING).is_empty());
        assert_eq!(format_time_only(NEW_YEAR_MORNING).len(), 5);
    }
}
