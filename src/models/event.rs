//! Event model

use std::fmt;
use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

/// Identifier that the backend and static data send either as a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => f.pad(&n.to_string()),
            EntityId::Text(s) => f.pad(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        EntityId::Number(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId::Text(s.to_string())
    }
}

/// Event category shown as a chip on the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[serde(alias = "deporte")]
    Sport,
    #[serde(alias = "fiesta")]
    Party,
    #[serde(alias = "concierto")]
    Concert,
    #[serde(alias = "teatro")]
    Theater,
    #[serde(alias = "feria")]
    Fair,
    #[serde(alias = "otro")]
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Party,
        Category::Sport,
        Category::Concert,
        Category::Theater,
        Category::Fair,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sport => "sport",
            Category::Party => "party",
            Category::Concert => "concert",
            Category::Theater => "theater",
            Category::Fair => "fair",
            Category::Other => "other",
        }
    }

    /// Parse a category name, accepting the Spanish names used by the site data
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "sport" | "deporte" => Some(Category::Sport),
            "party" | "fiesta" => Some(Category::Party),
            "concert" | "concierto" => Some(Category::Concert),
            "theater" | "teatro" => Some(Category::Theater),
            "fair" | "feria" => Some(Category::Fair),
            "other" | "otro" => Some(Category::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket price as published: a number, or a label such as "Entrada liberada"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardPrice {
    Amount(f64),
    Label(String),
}

/// A single event listing in the discovery grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCard {
    pub id: EntityId,
    pub title: String,
    #[serde(default, alias = "org")]
    pub organizer: Option<String>,
    pub region: String,
    #[serde(alias = "comuna")]
    pub commune: String,
    pub start: NaiveDate,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub price: Option<CardPrice>,
    #[serde(default, alias = "img")]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "tipo")]
    pub category: Option<Category>,
    #[serde(default, alias = "desc")]
    pub description: Option<String>,
}

impl EventCard {
    /// End date for display; single-day events end on their start date
    pub fn display_end(&self) -> NaiveDate {
        self.end.unwrap_or(self.start)
    }

    /// Category used for filtering; uncategorized events count as `Other`
    pub fn effective_category(&self) -> Category {
        self.category.unwrap_or(Category::Other)
    }

    pub fn is_multi_day(&self) -> bool {
        self.display_end() > self.start
    }
}

/// Payload for creating an event on the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub starts_at: String,
    pub ends_at: String,
    pub capacity: u32,
    pub venue_id: i64,
}
