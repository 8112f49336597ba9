//! Event types and timestamp decoding.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Event time - either a specific datetime or a whole-day date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTime {
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
}

impl EventTime {
    pub fn as_datetime(&self) -> DateTime<Utc> {
        match self {
            EventTime::DateTime(dt) => *dt,
            EventTime::Date(d) => d
                .and_hms_opt(0, 0, 0)
                .unwrap_or_default()
                .and_utc(),
        }
    }

    pub fn is_date_only(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }
}

/// One parsed VEVENT.
///
/// `start` is always present (records without one are never emitted);
/// `end` falls back to `start` when the source record has no DTEND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub start: EventTime,
    pub end: EventTime,
}

/// Decode an iCalendar DATE or DATE-TIME value.
///
/// Two forms are accepted: `YYYYMMDD` (whole-day, UTC midnight) and
/// `YYYYMMDDTHHMMSS` with an optional `Z` suffix (`Z` = UTC, otherwise the
/// value is taken as local time). Anything else returns `None` and the
/// caller drops the record.
pub fn parse_timestamp(value: &str) -> Option<EventTime> {
    let value = value.trim();

    if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
        let date = NaiveDate::parse_from_str(value, "%Y%m%d").ok()?;
        return Some(EventTime::Date(date));
    }

    if let Some(utc_part) = value.strip_suffix('Z') {
        let naive = NaiveDateTime::parse_from_str(utc_part, "%Y%m%dT%H%M%S").ok()?;
        return Some(EventTime::DateTime(Utc.from_utc_datetime(&naive)));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").ok()?;
    let local = chrono::Local.from_local_datetime(&naive).earliest()?;
    Some(EventTime::DateTime(local.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_date_only_decodes_to_utc_midnight() {
        let t = parse_timestamp("20250101").unwrap();
        assert!(t.is_date_only());
        assert_eq!(
            t.as_datetime().to_rfc3339(),
            "2025-01-01T00:00:00+00:00"
        );
    }

    #[test]
    fn test_utc_datetime() {
        let t = parse_timestamp("20250101T093000Z").unwrap();
        assert!(!t.is_date_only());
        assert_eq!(t.as_datetime().to_rfc3339(), "2025-01-01T09:30:00+00:00");
    }

    #[test]
    fn test_local_datetime_is_accepted() {
        // Exact instant depends on the host timezone; it must decode.
        let t = parse_timestamp("20250601T120000").unwrap();
        assert!(!t.is_date_only());
    }

    #[test]
    fn test_malformed_values_rejected() {
        assert!(parse_timestamp("2025-01-01").is_none());
        assert!(parse_timestamp("20251301").is_none());
        assert!(parse_timestamp("20250101T256000Z").is_none());
        assert!(parse_timestamp("garbage").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_leap_day() {
        let t = parse_timestamp("20240229").unwrap();
        assert_eq!(
            t.as_datetime().date_naive(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }
}
