//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the crate.

use serde_json::Value;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};
use crate::models::EntityId;

/// Fold text for case- and accent-insensitive comparison.
///
/// Lowercases, decomposes to NFD and drops combining marks, so
/// `"Peñalolén"` and `"penalolen"` fold to the same string.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Calculate pagination offset
pub fn calculate_offset(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1) * page_size
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", kept.trim_end())
    }
}

/// Format an amount as Chilean pesos, e.g. `$7.000`.
///
/// With `assume_cents` the amount is divided by 100 first.
pub fn format_clp(value: f64, assume_cents: bool) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let amount = if assume_cents { (value / 100.0).round() } else { value.round() } as i64;

    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Convert cents to whole pesos
pub fn from_cents(cents: f64) -> i64 {
    let cents = if cents.is_finite() { cents } else { 0.0 };
    (cents / 100.0).round() as i64
}

/// Convert whole pesos to cents, never negative
pub fn to_cents(pesos: f64) -> i64 {
    let pesos = if pesos.is_finite() { pesos } else { 0.0 };
    (pesos.round() as i64).max(0) * 100
}

/// Strip a RUT down to its digits and check digit, e.g. `"12.345.678-k"` -> `"12345678K"`
pub fn normalize_rut(rut: &str) -> String {
    rut.chars()
        .filter(|c| c.is_ascii_digit() || *c == 'k' || *c == 'K')
        .collect::<String>()
        .to_uppercase()
}

/// Read a JSON value as a string, falling back for null or missing values
pub fn as_string(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => fallback.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Read a JSON value as a finite number, falling back when it is not one
pub fn as_number(value: Option<&Value>, fallback: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => Some(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        Some(Value::Null) => Some(0.0),
        _ => None,
    };

    parsed.filter(|n| n.is_finite()).unwrap_or(fallback)
}

/// Read a JSON value as an identifier, generating a fresh one when absent
pub fn as_id(value: Option<&Value>) -> EntityId {
    match value {
        Some(Value::String(s)) => EntityId::Text(s.clone()),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => EntityId::Number(i),
            None => EntityId::Text(n.to_string()),
        },
        _ => EntityId::Text(uuid::Uuid::new_v4().to_string()),
    }
}
