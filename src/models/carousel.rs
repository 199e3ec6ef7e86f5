//! Home carousel model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselItem {
    pub id: i64,
    /// Ascending display position, starting at 1
    pub order: i64,
    pub src: String,
    pub title: String,
    pub text: String,
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCarouselItemPayload {
    pub src: String,
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Partial update; only the fields that are set are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarouselItemPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderCarouselRequest {
    pub ids_in_order: Vec<i64>,
}

/// Published slide as served to the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicSlide {
    pub src: String,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Sort slides by their display order
pub fn sort_by_order(items: &mut [CarouselItem]) {
    items.sort_by_key(|item| item.order);
}

/// Move the slide at `index` one position and renumber every slide from 1.
///
/// Returns `false` and leaves the list untouched when the move would fall
/// off either end.
pub fn move_slide(items: &mut [CarouselItem], index: usize, direction: MoveDirection) -> bool {
    let target = match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => index.checked_add(1).filter(|t| *t < items.len()),
    };

    let Some(target) = target else {
        return false;
    };
    if index >= items.len() {
        return false;
    }

    items.swap(index, target);
    for (position, item) in items.iter_mut().enumerate() {
        item.order = position as i64 + 1;
    }
    true
}
