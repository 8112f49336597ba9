//! Timeline assembly for Ganttboard.
//!
//! Turns cards and calendar events into the dated, colour-tagged entries
//! the charting widget renders, with pure filter state on top.

pub mod entry;
pub mod filter;
pub mod loader;
pub mod mapper;

pub use entry::{Category, ColourMap, ScheduleEntry, TimelineBar};
pub use filter::{listing_order, FilterState};
pub use loader::{load_timeline, LoadError, TimelineData};
pub use mapper::{map_card, map_cards, map_events, FALLBACK_WINDOW_DAYS};
