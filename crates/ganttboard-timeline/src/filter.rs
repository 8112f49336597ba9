//! Pure filter state for the rendered timeline and the sidebar listing.
//!
//! No module-level mutable state: the host owns a `FilterState`, mutates it
//! on user interaction and re-applies it to the immutable entry list.

use std::collections::HashSet;

use ganttboard_trello::Card;

use crate::entry::{Category, ScheduleEntry};

#[derive(Debug, Clone)]
pub struct FilterState {
    active_ids: HashSet<String>,
    enabled_categories: HashSet<Category>,
}

impl FilterState {
    /// State with every entry and every category enabled.
    pub fn enable_all(entries: &[ScheduleEntry]) -> Self {
        Self {
            active_ids: entries.iter().map(|e| e.id.clone()).collect(),
            enabled_categories: Category::all().iter().copied().collect(),
        }
    }

    pub fn set_entry(&mut self, id: &str, enabled: bool) {
        if enabled {
            self.active_ids.insert(id.to_string());
        } else {
            self.active_ids.remove(id);
        }
    }

    pub fn toggle_category(&mut self, category: Category) {
        if !self.enabled_categories.remove(&category) {
            self.enabled_categories.insert(category);
        }
    }

    pub fn is_visible(&self, entry: &ScheduleEntry) -> bool {
        self.active_ids.contains(&entry.id) && self.enabled_categories.contains(&entry.category)
    }

    /// The visible subset, in input order.
    pub fn apply<'a>(&self, entries: &'a [ScheduleEntry]) -> Vec<&'a ScheduleEntry> {
        entries.iter().filter(|e| self.is_visible(e)).collect()
    }
}

/// Sidebar order: category, then name. Dateless cards are listed too -
/// only the timeline itself requires dates.
pub fn listing_order(cards: &[Card]) -> Vec<&Card> {
    let mut sorted: Vec<&Card> = cards.iter().collect();
    sorted.sort_by(|a, b| {
        let ca = Category::from_labels(&a.labels);
        let cb = Category::from_labels(&b.labels);
        ca.as_str().cmp(cb.as_str()).then_with(|| a.name.cmp(&b.name))
    });
    sorted
}
