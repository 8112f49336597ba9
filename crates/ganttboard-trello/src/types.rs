//! Trello API types and data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Card as used by the rest of the application.
///
/// Dates are parsed up front; a card where both are `None` still exists
/// (the sidebar listing shows every card) but produces no timeline entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub start: Option<DateTime<Utc>>,
    pub due: Option<DateTime<Utc>>,
    pub labels: Vec<CardLabel>,
    pub short_url: Option<String>,
}

/// Label attached to a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardLabel {
    pub name: String,
    pub color: Option<String>,
}

// API Response Types

/// Raw card record as returned by the Trello REST API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCard {
    pub id: String,
    pub name: String,
    pub start: Option<String>,
    pub due: Option<String>,
    #[serde(default)]
    pub labels: Vec<ApiLabel>,
    pub short_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiLabel {
    #[serde(default)]
    pub name: String,
    pub color: Option<String>,
}

impl Card {
    /// Convert API response to local Card.
    pub fn from_api(api: ApiCard) -> Self {
        let start = api.start.as_deref().and_then(parse_card_timestamp);
        let due = api.due.as_deref().and_then(parse_card_timestamp);

        let labels = api
            .labels
            .into_iter()
            .map(|l| CardLabel {
                name: l.name,
                color: l.color,
            })
            .collect();

        Self {
            id: api.id,
            name: api.name,
            start,
            due,
            labels,
            short_url: api.short_url,
        }
    }

    /// True when at least one endpoint is known, i.e. the card can be
    /// placed on the timeline.
    pub fn has_dates(&self) -> bool {
        self.start.is_some() || self.due.is_some()
    }
}

fn parse_card_timestamp(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!("Discarding unparsable card timestamp {:?}: {}", value, e);
            None
        }
    }
}
