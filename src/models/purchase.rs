//! Purchase and attendance history models
//!
//! History endpoints are best-effort: entries are parsed leniently and
//! missing fields get display defaults instead of failing the whole list.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use super::EntityId;
use crate::utils::helpers::{as_id, as_number, as_string};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: EntityId,
    pub event_title: String,
    pub purchased_at: String,
    pub amount: f64,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendedEvent {
    pub id: EntityId,
    pub title: String,
    pub date: String,
    pub venue: String,
}

impl Purchase {
    /// Parse one history entry; non-object entries are skipped
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            id: as_id(obj.get("id")),
            event_title: as_string(obj.get("eventTitle"), "Evento"),
            purchased_at: as_string(obj.get("purchasedAt"), &Utc::now().to_rfc3339()),
            amount: as_number(obj.get("amount"), 0.0),
            quantity: as_number(obj.get("quantity"), 1.0),
        })
    }

    pub fn total(&self) -> f64 {
        self.amount * self.quantity
    }
}

impl AttendedEvent {
    /// Parse one attendance entry; non-object entries are skipped
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            id: as_id(obj.get("id")),
            title: as_string(obj.get("title"), "Evento"),
            date: as_string(obj.get("date"), &Utc::now().to_rfc3339()),
            venue: as_string(obj.get("venue"), "—"),
        })
    }
}

/// Parse a history list, returning an empty list for anything but an array
pub fn parse_list<T>(value: &Value, parse: impl Fn(&Value) -> Option<T>) -> Vec<T> {
    match value {
        Value::Array(items) => items.iter().filter_map(parse).collect(),
        _ => Vec::new(),
    }
}
