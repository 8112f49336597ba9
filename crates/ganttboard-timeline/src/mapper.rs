//! Card and calendar-event mapping into schedule entries.

use chrono::Duration;

use ganttboard_ics::CalendarEvent;
use ganttboard_trello::Card;

use crate::entry::{Category, ColourMap, ScheduleEntry};

/// Window applied when only one endpoint of a card is known.
pub const FALLBACK_WINDOW_DAYS: i64 = 7;

/// Map one card to at most one entry.
///
/// Cards with a single known endpoint get the fixed fallback window on the
/// other side; cards with neither endpoint produce nothing (they still show
/// up in the sidebar listing, just not on the timeline).
pub fn map_card(card: &Card, colours: &ColourMap) -> Option<ScheduleEntry> {
    let window = Duration::days(FALLBACK_WINDOW_DAYS);
    let (start, end) = match (card.start, card.due) {
        (Some(start), Some(due)) => (start, due),
        (Some(start), None) => (start, start + window),
        (None, Some(due)) => (due - window, due),
        (None, None) => {
            tracing::debug!("Skipping card without dates: {}", card.name);
            return None;
        }
    };

    let category = Category::from_labels(&card.labels);
    let first_label = card.labels.first().map(|l| l.name.as_str());
    let colour = colours.resolve(first_label, category);

    Some(ScheduleEntry {
        id: card.id.clone(),
        name: card.name.clone(),
        start,
        end,
        colour,
        category,
        short_url: card.short_url.clone(),
    })
}

pub fn map_cards(cards: &[Card], colours: &ColourMap) -> Vec<ScheduleEntry> {
    cards
        .iter()
        .filter_map(|card| map_card(card, colours))
        .collect()
}

/// Map the events of one feed into entries filed under the feed's category.
///
/// Colour resolution runs the same chain as for cards, keyed by the feed
/// name (so a feed called "Holiday" picks up the Holiday colour).
pub fn map_events(
    feed_name: &str,
    category: Category,
    events: Vec<CalendarEvent>,
    colours: &ColourMap,
) -> Vec<ScheduleEntry> {
    let colour = colours.resolve(Some(feed_name), category);
    events
        .into_iter()
        .enumerate()
        .map(|(i, event)| ScheduleEntry {
            id: format!("{}-{}", feed_name, i),
            name: event.summary,
            start: event.start.as_datetime(),
            end: event.end.as_datetime(),
            colour: colour.clone(),
            category,
            short_url: None,
        })
        .collect()
}
