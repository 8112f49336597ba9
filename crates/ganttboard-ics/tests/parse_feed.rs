//! End-to-end parse of a realistic feed blob.

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use ganttboard_ics::{parse_events, EventTime};

// A feed the way calendar exports actually look: folded lines, CRLF
// endings, params on properties, one broken record, one dateless record.
const FEED: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp//Leave Calendar//EN\r\n\
BEGIN:VEVENT\r\n\
UID:1@example.com\r\n\
SUMMARY:Company retreat\r\n\
DESCRIPTION:Bring walking shoes\\, sunscreen\\nand a jumper\r\n\
DTSTART;VALUE=DATE:20250602\r\n\
DTEND;VALUE=DATE:20250605\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:2@example.com\r\n\
SUMMARY:Planning meeting with a title long enough\r\n\
\x20 to be folded across two physical lines\r\n\
DTSTART:20250610T090000Z\r\n\
DTEND:20250610T103000Z\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:3@example.com\r\n\
SUMMARY:Broken timestamp\r\n\
DTSTART:tomorrow-ish\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:4@example.com\r\n\
SUMMARY:No dates at all\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:5@example.com\r\n\
SUMMARY:Rich text only\r\n\
X-ALT-DESC;FMTTYPE=text/html:<html><body>First<br>Second</body></html>\r\n\
DTSTART;VALUE=DATE:20250701\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn parses_only_well_formed_records_in_source_order() {
    let events: Vec<_> = parse_events(FEED).collect();

    assert_eq!(events.len(), 3);
    assert_eq!(events[0].summary, "Company retreat");
    assert_eq!(
        events[1].summary,
        "Planning meeting with a title long enough to be folded across two physical lines"
    );
    assert_eq!(events[2].summary, "Rich text only");
}

#[test]
fn date_only_range_is_inclusive() {
    let events: Vec<_> = parse_events(FEED).collect();

    // DTEND 20250605 is the exclusive convention: last covered day is the 4th.
    assert_eq!(events[0].start, EventTime::Date(day(2025, 6, 2)));
    assert_eq!(events[0].end, EventTime::Date(day(2025, 6, 4)));
}

#[test]
fn description_escapes_and_markup() {
    let events: Vec<_> = parse_events(FEED).collect();

    assert_eq!(
        events[0].description,
        "Bring walking shoes, sunscreen\nand a jumper"
    );
    assert_eq!(events[2].description, "First\nSecond");
}

#[test]
fn timed_event_keeps_instants() {
    let events: Vec<_> = parse_events(FEED).collect();

    assert_eq!(
        events[1].start.as_datetime().to_rfc3339(),
        "2025-06-10T09:00:00+00:00"
    );
    assert_eq!(
        events[1].end.as_datetime().to_rfc3339(),
        "2025-06-10T10:30:00+00:00"
    );
}

#[test]
fn reparsing_yields_identical_sequence() {
    let first: Vec<_> = parse_events(FEED).collect();
    let second: Vec<_> = parse_events(FEED).collect();
    assert_eq!(first, second);
}
