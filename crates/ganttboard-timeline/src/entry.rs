//! Schedule entries, category inference and colour resolution.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ganttboard_core::ColourConfig;
use ganttboard_trello::CardLabel;

/// Coarse grouping used for colouring and filtering, inferred from labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "ME")]
    Me,
    #[serde(rename = "LRL")]
    Lrl,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Me => "ME",
            Category::Lrl => "LRL",
            Category::Other => "Other",
        }
    }

    /// Infer the category from a card's labels.
    ///
    /// Case-insensitive, fixed precedence: ME before LRL, anything else is
    /// Other. Total - every label set maps to exactly one category.
    pub fn from_labels(labels: &[CardLabel]) -> Self {
        let names: Vec<String> = labels.iter().map(|l| l.name.to_uppercase()).collect();
        if names.iter().any(|n| n == "ME") {
            return Category::Me;
        }
        if names.iter().any(|n| n == "LRL") {
            return Category::Lrl;
        }
        Category::Other
    }

    /// Parse a configured category name; unknown names land in Other.
    pub fn from_name(name: &str) -> Self {
        match name.to_uppercase().as_str() {
            "ME" => Category::Me,
            "LRL" => Category::Lrl,
            _ => Category::Other,
        }
    }

    /// Get all category variants
    pub fn all() -> &'static [Category] {
        &[Category::Me, Category::Lrl, Category::Other]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour table for bars. First match wins: literal label text, then the
/// inferred category name, then the default.
#[derive(Debug, Clone)]
pub struct ColourMap {
    labels: HashMap<String, String>,
    default_colour: String,
}

impl ColourMap {
    pub fn resolve(&self, first_label: Option<&str>, category: Category) -> String {
        if let Some(colour) = first_label.and_then(|l| self.labels.get(l)) {
            return colour.clone();
        }
        if let Some(colour) = self.labels.get(category.as_str()) {
            return colour.clone();
        }
        self.default_colour.clone()
    }
}

impl From<&ColourConfig> for ColourMap {
    fn from(config: &ColourConfig) -> Self {
        Self {
            labels: config.labels.clone().into_iter().collect(),
            default_colour: config.default_colour.clone(),
        }
    }
}

impl Default for ColourMap {
    fn default() -> Self {
        Self::from(&ColourConfig::default())
    }
}

/// One dated, colour-tagged bar on the timeline.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntry {
    pub id: String,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub colour: String,
    pub category: Category,
    pub short_url: Option<String>,
}

/// Entry shape consumed by the charting widget: strict `YYYY-MM-DD`
/// strings and the widget's field names.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineBar {
    pub id: String,
    pub name: String,
    pub start: String,
    pub end: String,
    pub progress: u8,
    pub custom_class: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_url: Option<String>,
}

impl ScheduleEntry {
    pub fn to_bar(&self) -> TimelineBar {
        TimelineBar {
            id: self.id.clone(),
            name: self.name.clone(),
            start: self.start.format("%Y-%m-%d").to_string(),
            end: self.end.format("%Y-%m-%d").to_string(),
            progress: 0,
            custom_class: format!("task-{}", self.id),
            color: self.colour.clone(),
            short_url: self.short_url.clone(),
        }
    }
}
