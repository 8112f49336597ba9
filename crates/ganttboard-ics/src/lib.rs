//! iCalendar feed support for Ganttboard.
//!
//! A deliberately small slice of RFC 5545: line unfolding, VEVENT record
//! extraction, the two timestamp forms the timeline needs, and TEXT
//! unescaping. Everything a feed gets wrong is dropped silently; an
//! auxiliary calendar can only ever shrink, never break, a load cycle.

pub mod client;
pub mod error;
pub mod parser;
pub mod text;
pub mod types;

pub use client::FeedClient;
pub use error::FeedError;
pub use parser::{parse_events, EventIter};
pub use types::{parse_timestamp, CalendarEvent, EventTime};
