//! Subscription plan model
//!
//! The backend exposes plans in two shapes: the public marketing list
//! (`price`, inline benefit arrays) and the admin list (`priceCl`, benefits
//! encoded as JSON strings). Both are mapped onto [`PlanDefinition`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::utils::helpers::{as_number, as_string, format_clp, from_cents, to_cents};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDefinition {
    pub id: String,
    pub name: String,
    /// Price in whole CLP
    pub price_cents: i64,
    pub period: String,
    pub highlight: bool,
    pub badge: Option<String>,
    pub description: String,
    /// `None` means unlimited
    pub can_create_events: Option<i64>,
    /// `None` means unlimited
    pub can_manage_events: Option<i64>,
    pub benefits: Vec<String>,
    pub limitations: Vec<String>,
    pub updated_at: Option<String>,
}

/// Admin wire shape of a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminApiPlan {
    pub id: String,
    pub name: String,
    pub price_cl: i64,
    pub period: String,
    pub highlight: bool,
    #[serde(default)]
    pub badge: Option<String>,
    pub description: String,
    #[serde(default)]
    pub can_create_events: Option<i64>,
    #[serde(default)]
    pub can_manage_events: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limitations_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn decode_string_list(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str::<Vec<String>>(s).ok())
        .unwrap_or_default()
}

fn optional_count(value: Option<&Value>) -> Option<i64> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(as_number(Some(v), 0.0) as i64),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(|v| as_string(Some(v), "")).collect(),
        _ => Vec::new(),
    }
}

impl From<AdminApiPlan> for PlanDefinition {
    fn from(p: AdminApiPlan) -> Self {
        Self {
            benefits: decode_string_list(p.benefits_json.as_deref()),
            limitations: decode_string_list(p.limitations_json.as_deref()),
            id: p.id,
            name: p.name,
            price_cents: p.price_cl,
            period: p.period,
            highlight: p.highlight,
            badge: p.badge,
            description: p.description,
            can_create_events: p.can_create_events,
            can_manage_events: p.can_manage_events,
            updated_at: p.updated_at,
        }
    }
}

impl PlanDefinition {
    /// Map one entry of the public plan list, tolerating missing fields
    pub fn from_public(value: &Value) -> Self {
        let highlight = match value.get("highlight") {
            Some(Value::Bool(b)) => *b,
            Some(Value::Null) | None => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(n)) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
            Some(_) => true,
        };

        Self {
            id: as_string(value.get("id"), ""),
            name: as_string(value.get("name"), ""),
            price_cents: as_number(value.get("price"), 0.0) as i64,
            period: as_string(value.get("period"), "/mes"),
            highlight,
            badge: match value.get("badge") {
                None | Some(Value::Null) => None,
                Some(v) => Some(as_string(Some(v), "")),
            },
            description: as_string(value.get("description"), ""),
            can_create_events: optional_count(value.get("canCreateEvents")),
            can_manage_events: optional_count(value.get("canManageEvents")),
            benefits: string_list(value.get("benefits")),
            limitations: string_list(value.get("limitations")),
            updated_at: match value.get("updatedAt") {
                None | Some(Value::Null) => None,
                Some(v) => Some(as_string(Some(v), "")),
            },
        }
    }

    /// Admin wire body for creating or updating this plan
    pub fn to_admin_body(&self) -> AdminApiPlan {
        AdminApiPlan {
            id: self.normalized_id(),
            name: self.name.clone(),
            price_cl: self.price_cents,
            period: if self.period.is_empty() { "/mes".to_string() } else { self.period.clone() },
            highlight: self.highlight,
            badge: self.badge.clone(),
            description: self.description.clone(),
            can_create_events: self.can_create_events,
            can_manage_events: self.can_manage_events,
            benefits_json: Some(serde_json::to_string(&self.benefits).unwrap_or_else(|_| "[]".to_string())),
            limitations_json: Some(serde_json::to_string(&self.limitations).unwrap_or_else(|_| "[]".to_string())),
            updated_at: None,
        }
    }

    pub fn normalized_id(&self) -> String {
        self.id.trim().to_lowercase()
    }

    /// Price in whole pesos, as the admin form edits it
    pub fn price_pesos(&self) -> i64 {
        from_cents(self.price_cents as f64)
    }

    pub fn set_price_pesos(&mut self, pesos: f64) {
        self.price_cents = to_cents(pesos);
    }

    /// `$9.990/mes`, or `Gratis` for a zero price
    pub fn price_label(&self) -> String {
        if self.price_cents <= 0 {
            return "Gratis".to_string();
        }
        format!("{}{}", format_clp(self.price_cents as f64, true), self.period)
    }
}
