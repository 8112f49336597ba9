//! One load cycle: fetch the board and every configured feed, reconcile
//! into the timeline input.

use futures::future::join_all;
use thiserror::Error;

use ganttboard_core::{CalendarSource, Config};
use ganttboard_ics::{parse_events, CalendarEvent, FeedClient};
use ganttboard_trello::{Card, TrelloClient, TrelloError};

use crate::entry::{Category, ColourMap, ScheduleEntry};
use crate::mapper::{map_cards, map_events};

/// Errors that abort a load cycle. Feed failures never land here; they
/// degrade to an empty contribution.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Trello(#[from] TrelloError),
}

impl LoadError {
    /// Status-line message for the failed cycle.
    pub fn user_message(&self) -> String {
        match self {
            Self::Trello(e) => e.user_message(),
        }
    }
}

/// Everything one render cycle needs.
#[derive(Debug)]
pub struct TimelineData {
    /// All cards, dateless ones included (the sidebar shows every card).
    pub cards: Vec<Card>,
    /// Timeline entries from cards and calendar feeds.
    pub entries: Vec<ScheduleEntry>,
    /// Human summary for the status line.
    pub status: String,
}

/// Fetch cards and feeds concurrently and assemble the timeline input.
///
/// The board fetch is the primary source: its failure fails the cycle.
/// Each auxiliary feed degrades to an empty event list on error.
pub async fn load_timeline(
    trello: &TrelloClient,
    feeds: &FeedClient,
    config: &Config,
) -> Result<TimelineData, LoadError> {
    let (cards, feed_events) = tokio::join!(
        trello.list_cards(&config.trello.board_id),
        fetch_feeds(feeds, &config.calendars),
    );
    let cards = cards?;

    let colours = ColourMap::from(&config.colours);
    let mut entries = map_cards(&cards, &colours);
    for (source, events) in feed_events {
        let category = source
            .category
            .as_deref()
            .map(Category::from_name)
            .unwrap_or(Category::Other);
        entries.extend(map_events(&source.name, category, events, &colours));
    }

    let dated = cards.iter().filter(|c| c.has_dates()).count();
    let status = format!(
        "Loaded {} card(s) ({} with dates) from Trello.",
        cards.len(),
        dated
    );
    tracing::info!("{}", status);

    Ok(TimelineData {
        cards,
        entries,
        status,
    })
}

async fn fetch_feeds<'a>(
    client: &FeedClient,
    sources: &'a [CalendarSource],
) -> Vec<(&'a CalendarSource, Vec<CalendarEvent>)> {
    let fetches = sources.iter().map(|source| async move {
        match client.fetch_text(&source.url).await {
            Ok(text) => {
                let events: Vec<CalendarEvent> = parse_events(&text).collect();
                tracing::info!("Feed '{}': {} event(s)", source.name, events.len());
                (source, events)
            }
            Err(e) => {
                tracing::warn!(
                    "Feed '{}' degraded to empty: {}",
                    source.name,
                    e.user_message()
                );
                (source, Vec::new())
            }
        }
    });
    join_all(fetches).await
}
