//! VEVENT record parser.
//!
//! Works on the physical-line level of the iCalendar format: unfold
//! continuation lines, walk BEGIN/END blocks, keep the last occurrence of
//! each property, and decode only what the timeline needs (SUMMARY,
//! DESCRIPTION/X-ALT-DESC, DTSTART, DTEND). Records that cannot yield a
//! well-formed dated event are dropped, never surfaced as errors.

use std::collections::HashMap;

use chrono::Duration;

use crate::text::{strip_markup, unescape_text};
use crate::types::{parse_timestamp, CalendarEvent, EventTime};

const BEGIN_EVENT: &str = "BEGIN:VEVENT";
const END_EVENT: &str = "END:VEVENT";

/// Parse raw ICS text into an iterator of events, in source record order.
///
/// The iterator is finite and restartable: calling `parse_events` again on
/// the same text yields an identical sequence. Callers wanting
/// chronological order sort the collected result themselves.
pub fn parse_events(text: &str) -> EventIter {
    EventIter {
        lines: unfold_lines(text),
        pos: 0,
    }
}

/// Iterator over the well-formed VEVENTs of one ICS text.
pub struct EventIter {
    lines: Vec<String>,
    pos: usize,
}

impl Iterator for EventIter {
    type Item = CalendarEvent;

    fn next(&mut self) -> Option<CalendarEvent> {
        while self.pos < self.lines.len() {
            if self.lines[self.pos] != BEGIN_EVENT {
                self.pos += 1;
                continue;
            }
            self.pos += 1;

            let mut props: HashMap<String, String> = HashMap::new();
            let mut closed = false;
            while self.pos < self.lines.len() {
                let line = self.lines[self.pos].as_str();
                self.pos += 1;
                if line == END_EVENT {
                    closed = true;
                    break;
                }
                if let Some((key, value)) = split_property(line) {
                    // Duplicate properties: last occurrence wins.
                    props.insert(key.to_string(), value.to_string());
                }
            }
            // Record truncated at end of input; nothing more to emit.
            if !closed {
                return None;
            }

            if let Some(event) = build_event(&props) {
                return Some(event);
            }
            tracing::debug!("Dropping VEVENT without a usable date range");
        }
        None
    }
}

/// Normalize line endings and unfold continuation lines.
///
/// A physical line starting with one space or tab continues the previous
/// logical line; the single leading whitespace character is stripped.
fn unfold_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for raw in text.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(rest) = line.strip_prefix(' ').or_else(|| line.strip_prefix('\t')) {
            if let Some(prev) = lines.last_mut() {
                prev.push_str(rest);
                continue;
            }
        }
        lines.push(line.to_string());
    }
    lines
}

/// Split `PROPERTY[;PARAMS]:VALUE`, keeping only the property name as key.
fn split_property(line: &str) -> Option<(&str, &str)> {
    let colon = line.find(':')?;
    let key_end = match line.find(';') {
        Some(semi) => semi.min(colon),
        None => colon,
    };
    Some((&line[..key_end], &line[colon + 1..]))
}

fn build_event(props: &HashMap<String, String>) -> Option<CalendarEvent> {
    let start = parse_timestamp(props.get("DTSTART")?)?;

    let end = match props.get("DTEND") {
        None => start.clone(),
        Some(raw) => {
            // A present-but-malformed end drops the whole record.
            let decoded = parse_timestamp(raw)?;
            match (&start, &decoded) {
                // Date-only ranges use an exclusive end; make it inclusive.
                (EventTime::Date(s), EventTime::Date(e)) => {
                    let inclusive = *e - Duration::days(1);
                    if inclusive < *s {
                        return None;
                    }
                    EventTime::Date(inclusive)
                }
                _ => decoded,
            }
        }
    };

    let summary = props
        .get("SUMMARY")
        .map(|s| unescape_text(s))
        .unwrap_or_default();

    let description = match props.get("DESCRIPTION") {
        Some(d) => unescape_text(d),
        None => props
            .get("X-ALT-DESC")
            .map(|d| strip_markup(&unescape_text(d)))
            .unwrap_or_default(),
    };

    Some(CalendarEvent {
        summary,
        description,
        start,
        end,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_event() {
        let ics = "BEGIN:VCALENDAR\r\n\
                   BEGIN:VEVENT\r\n\
                   SUMMARY:New Year\r\n\
                   DTSTART;VALUE=DATE:20250101\r\n\
                   END:VEVENT\r\n\
                   END:VCALENDAR\r\n";

        let events: Vec<_> = parse_events(ics).collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "New Year");
        assert_eq!(events[0].start, EventTime::Date(day(2025, 1, 1)));
        // No DTEND: single instant.
        assert_eq!(events[0].end, events[0].start);
    }

    #[test]
    fn test_unfolding_reconstructs_value() {
        let ics = "BEGIN:VEVENT\r\n\
                   SUMMARY:A very long summar\r\n \
                   y that was folded\r\n\
                   DTSTART:20250101T100000Z\r\n\
                   END:VEVENT\r\n";

        let events: Vec<_> = parse_events(ics).collect();
        assert_eq!(events[0].summary, "A very long summary that was folded");
    }

    #[test]
    fn test_tab_continuation_and_bare_newlines() {
        let ics = "BEGIN:VEVENT\nSUMMARY:Two\n\tparts\nDTSTART:20250101T100000Z\nEND:VEVENT\n";
        let events: Vec<_> = parse_events(ics).collect();
        assert_eq!(events[0].summary, "Twoparts");
    }

    #[test]
    fn test_exclusive_end_becomes_inclusive() {
        let ics = "BEGIN:VEVENT\n\
                   SUMMARY:Break\n\
                   DTSTART;VALUE=DATE:20250101\n\
                   DTEND;VALUE=DATE:20250103\n\
                   END:VEVENT\n";

        let events: Vec<_> = parse_events(ics).collect();
        assert_eq!(events[0].end, EventTime::Date(day(2025, 1, 2)));
    }

    #[test]
    fn test_date_only_range_ending_before_start_dropped() {
        let ics = "BEGIN:VEVENT\n\
                   SUMMARY:Backwards\n\
                   DTSTART;VALUE=DATE:20250105\n\
                   DTEND;VALUE=DATE:20250103\n\
                   END:VEVENT\n";

        assert_eq!(parse_events(ics).count(), 0);
    }

    #[test]
    fn test_datetime_range_not_adjusted() {
        let ics = "BEGIN:VEVENT\n\
                   SUMMARY:Meeting\n\
                   DTSTART:20250101T100000Z\n\
                   DTEND:20250101T110000Z\n\
                   END:VEVENT\n";

        let events: Vec<_> = parse_events(ics).collect();
        assert_eq!(
            events[0].end.as_datetime().to_rfc3339(),
            "2025-01-01T11:00:00+00:00"
        );
    }

    #[test]
    fn test_missing_start_dropped() {
        let ics = "BEGIN:VEVENT\nSUMMARY:No date\nEND:VEVENT\n";
        assert_eq!(parse_events(ics).count(), 0);
    }

    #[test]
    fn test_malformed_start_drops_record() {
        let ics = "BEGIN:VEVENT\n\
                   SUMMARY:Broken\n\
                   DTSTART:garbage\n\
                   DTEND:20250103T000000Z\n\
                   END:VEVENT\n";
        assert_eq!(parse_events(ics).count(), 0);
    }

    #[test]
    fn test_malformed_end_drops_record() {
        let ics = "BEGIN:VEVENT\n\
                   SUMMARY:Broken end\n\
                   DTSTART:20250101T000000Z\n\
                   DTEND:not-a-date\n\
                   END:VEVENT\n";
        assert_eq!(parse_events(ics).count(), 0);
    }

    #[test]
    fn test_duplicate_property_last_wins() {
        let ics = "BEGIN:VEVENT\n\
                   SUMMARY:First\n\
                   SUMMARY:Second\n\
                   DTSTART:20250101T100000Z\n\
                   END:VEVENT\n";

        let events: Vec<_> = parse_events(ics).collect();
        assert_eq!(events[0].summary, "Second");
    }

    #[test]
    fn test_description_unescaped() {
        let ics = "BEGIN:VEVENT\n\
                   SUMMARY:Escapes\n\
                   DESCRIPTION:Line1\\nLine2\\, with comma\n\
                   DTSTART:20250101T100000Z\n\
                   END:VEVENT\n";

        let events: Vec<_> = parse_events(ics).collect();
        assert_eq!(events[0].description, "Line1\nLine2, with comma");
    }

    #[test]
    fn test_alt_desc_used_only_when_description_absent() {
        let ics = "BEGIN:VEVENT\n\
                   SUMMARY:Alt\n\
                   X-ALT-DESC;FMTTYPE=text/html:<p>Hello<br>world</p>\n\
                   DTSTART:20250101T100000Z\n\
                   END:VEVENT\n";

        let events: Vec<_> = parse_events(ics).collect();
        assert_eq!(events[0].description, "Hello\nworld");

        let ics_both = "BEGIN:VEVENT\n\
                        SUMMARY:Both\n\
                        DESCRIPTION:plain\n\
                        X-ALT-DESC;FMTTYPE=text/html:<p>rich</p>\n\
                        DTSTART:20250101T100000Z\n\
                        END:VEVENT\n";

        let events: Vec<_> = parse_events(ics_both).collect();
        assert_eq!(events[0].description, "plain");
    }

    #[test]
    fn test_truncated_record_not_emitted() {
        let ics = "BEGIN:VEVENT\nSUMMARY:Cut off\nDTSTART:20250101T100000Z\n";
        assert_eq!(parse_events(ics).count(), 0);
    }

    #[test]
    fn test_property_params_ignored_for_key() {
        let ics = "BEGIN:VEVENT\n\
                   SUMMARY;LANGUAGE=en:Tagged\n\
                   DTSTART;TZID=UTC;VALUE=DATE-TIME:20250101T100000Z\n\
                   END:VEVENT\n";

        let events: Vec<_> = parse_events(ics).collect();
        assert_eq!(events[0].summary, "Tagged");
    }
}
