//! Event filter engine
//!
//! Combines free-text search, region/commune equality, a price ceiling and
//! the category chip into a single predicate over event cards. Filtering is
//! a pure function of the cards and the [`FilterState`]: it keeps the input
//! order and has no side effects.

use serde::{Deserialize, Serialize};
use crate::models::{CardPrice, Category, EventCard};
use crate::utils::helpers::normalize_text;

/// Price ceiling of the untouched price slider
pub const DEFAULT_PRICE_CEILING: f64 = 1_000_000.0;

/// Normalized price of invite-only events.
///
/// Being negative, it passes every non-negative ceiling.
pub const INVITE_ONLY_PRICE: f64 = -1.0;

/// Category chip selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "category")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, card: &EventCard) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => card.effective_category() == *category,
        }
    }

    /// Parse a chip name; `"all"` and `"todos"` select every category
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" | "todos" => Some(CategoryFilter::All),
            other => Category::parse(other).map(CategoryFilter::Only),
        }
    }
}

/// Filters applied to the event listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
    /// Empty selects every region
    pub region: String,
    /// Empty selects every commune
    pub commune: String,
    /// Inclusive upper bound on the normalized price
    pub price_ceiling: f64,
    pub category: CategoryFilter,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            region: String::new(),
            commune: String::new(),
            price_ceiling: DEFAULT_PRICE_CEILING,
            category: CategoryFilter::All,
        }
    }
}

impl FilterState {
    /// Defaults with a custom price ceiling, for listings configured with another slider range
    pub fn with_ceiling(price_ceiling: f64) -> Self {
        Self {
            price_ceiling,
            ..Self::default()
        }
    }

    /// Whether any filter departs from the permissive defaults
    pub fn is_active(&self, default_ceiling: f64) -> bool {
        !self.query.is_empty()
            || !self.region.is_empty()
            || !self.commune.is_empty()
            || self.price_ceiling < default_ceiling
            || self.category != CategoryFilter::All
    }

    /// Test a single card against every filter
    pub fn matches(&self, card: &EventCard) -> bool {
        CardMatcher::new(self).matches(card)
    }

    /// Keep the cards that pass every filter, in input order
    pub fn apply<'a>(&self, cards: &'a [EventCard]) -> Vec<&'a EventCard> {
        let matcher = CardMatcher::new(self);
        cards.iter().filter(|card| matcher.matches(card)).collect()
    }
}

/// Predicate with the query folded once up front
struct CardMatcher<'f> {
    state: &'f FilterState,
    query: String,
}

impl<'f> CardMatcher<'f> {
    fn new(state: &'f FilterState) -> Self {
        Self {
            state,
            query: normalize_text(&state.query),
        }
    }

    fn matches(&self, card: &EventCard) -> bool {
        self.matches_text(card)
            && (self.state.region.is_empty() || card.region == self.state.region)
            && (self.state.commune.is_empty() || card.commune == self.state.commune)
            && normalize_price(card.price.as_ref()) <= self.state.price_ceiling
            && self.state.category.matches(card)
    }

    fn matches_text(&self, card: &EventCard) -> bool {
        if self.query.is_empty() {
            return true;
        }

        let mut pool: Vec<&str> = vec![
            card.title.as_str(),
            card.organizer.as_deref().unwrap_or(""),
            card.region.as_str(),
            card.commune.as_str(),
        ];
        pool.extend(card.tags.iter().map(String::as_str));

        let haystack = pool
            .into_iter()
            .map(normalize_text)
            .collect::<Vec<_>>()
            .join(" ");
        haystack.contains(&self.query)
    }
}

/// Map a published price onto a number comparable with the price ceiling.
///
/// Numbers pass through. Labels lose `$`, `.` and spaces, then "gratis" and
/// "entrada liberada" become 0, as does a label that is exactly "free".
/// Anything mentioning an invitation becomes [`INVITE_ONLY_PRICE`], and the
/// rest is read as the first number in the label, defaulting to 0. A missing
/// price counts as 0.
pub fn normalize_price(price: Option<&CardPrice>) -> f64 {
    match price {
        None => 0.0,
        Some(CardPrice::Amount(amount)) => *amount,
        Some(CardPrice::Label(label)) => {
            let sanitized: String = label
                .chars()
                .filter(|c| !matches!(c, '$' | '.' | ' '))
                .collect::<String>()
                .to_lowercase();

            if sanitized.contains("entradaliberada") || sanitized.contains("gratis") || sanitized == "free" {
                0.0
            } else if sanitized.contains("invit") {
                INVITE_ONLY_PRICE
            } else {
                parse_first_number(&sanitized).unwrap_or(0.0)
            }
        }
    }
}

/// Read the first number in `text`, skipping any leading words.
/// `"7000clp"` -> 7000, `"freestyle5000"` -> 5000, `"1e3"` -> 1000
fn parse_first_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let start = match start.checked_sub(1).map(|i| bytes[i]) {
        Some(b'-') | Some(b'+') => start - 1,
        _ => start,
    };

    let digits_from = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = start + usize::from(!bytes[start].is_ascii_digit());
    end += digits_from(end);

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'-') | Some(b'+')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }

    text[start..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::models::EntityId;

    fn card(id: i64, title: &str, region: &str, commune: &str, price: Option<CardPrice>) -> EventCard {
        EventCard {
            id: EntityId::Number(id),
            title: title.to_string(),
            organizer: None,
            region: region.to_string(),
            commune: commune.to_string(),
            start: NaiveDate::from_ymd_opt(2025, 11, 15).unwrap(),
            end: None,
            price,
            image: None,
            tags: vec![],
            category: None,
            description: None,
        }
    }

    #[test]
    fn test_free_labels_normalize_to_zero() {
        for label in ["Entrada liberada", "entrada liberada", "Gratis", "GRATIS!", "Free"] {
            let price = CardPrice::Label(label.to_string());
            assert_eq!(normalize_price(Some(&price)), 0.0, "label {label}");
        }
    }

    #[test]
    fn test_invite_labels_normalize_to_sentinel() {
        for label in ["Solo invitados", "invitados", "Invite-only"] {
            let price = CardPrice::Label(label.to_string());
            assert_eq!(normalize_price(Some(&price)), INVITE_ONLY_PRICE, "label {label}");
        }
    }

    #[test]
    fn test_free_must_be_the_whole_label() {
        let freestyle = CardPrice::Label("Freestyle $5.000".to_string());
        assert_eq!(normalize_price(Some(&freestyle)), 5000.0);

        let free_entry = CardPrice::Label("Free entry".to_string());
        assert_eq!(normalize_price(Some(&free_entry)), 0.0);

        let ceiling = FilterState { price_ceiling: 0.0, ..Default::default() };
        let cards = vec![card(1, "Freestyle", "", "", Some(freestyle))];
        assert!(ceiling.apply(&cards).is_empty());
    }

    #[test]
    fn test_numbers_with_exponent() {
        assert_eq!(normalize_price(Some(&CardPrice::Label("1e3".to_string()))), 1000.0);
        assert_eq!(normalize_price(Some(&CardPrice::Label("25E+2".to_string()))), 2500.0);
        assert_eq!(normalize_price(Some(&CardPrice::Label("7000 CLP".to_string()))), 7000.0);
        assert_eq!(normalize_price(Some(&CardPrice::Label("3e".to_string()))), 3.0);
        assert_eq!(normalize_price(Some(&CardPrice::Label("-500".to_string()))), -500.0);
    }

    #[test]
    fn test_currency_labels_parse() {
        assert_eq!(normalize_price(Some(&CardPrice::Label("$7.000".to_string()))), 7000.0);
        assert_eq!(normalize_price(Some(&CardPrice::Label("$ 15.000 CLP".to_string()))), 15000.0);
        assert_eq!(normalize_price(Some(&CardPrice::Label("consultar".to_string()))), 0.0);
        assert_eq!(normalize_price(Some(&CardPrice::Amount(12500.0))), 12500.0);
        assert_eq!(normalize_price(None), 0.0);
    }

    #[test]
    fn test_text_search_ignores_case_and_accents() {
        let mut techno = card(1, "Hard Techno", "Región Metropolitana de Santiago", "Providencia", None);
        techno.organizer = Some("ElectroCL".to_string());
        let mut fair = card(2, "Feria del Libro", "Región de Valparaíso", "Viña del Mar", None);
        fair.tags = vec!["Lectura".to_string()];
        let cards = vec![techno, fair];

        let by_title = FilterState { query: "techno".to_string(), ..Default::default() };
        assert_eq!(by_title.apply(&cards).len(), 1);

        let by_region = FilterState { query: "valparaiso".to_string(), ..Default::default() };
        assert_eq!(by_region.apply(&cards)[0].id, EntityId::Number(2));

        let by_organizer = FilterState { query: "electrocl".to_string(), ..Default::default() };
        assert_eq!(by_organizer.apply(&cards)[0].id, EntityId::Number(1));

        let by_tag = FilterState { query: "LECTURA".to_string(), ..Default::default() };
        assert_eq!(by_tag.apply(&cards).len(), 1);

        let across_fields = FilterState { query: "electrocl region".to_string(), ..Default::default() };
        assert_eq!(across_fields.apply(&cards).len(), 1);
    }

    #[test]
    fn test_region_and_commune_match_exactly() {
        let cards = vec![
            card(1, "A", "Región de Valparaíso", "San Felipe", None),
            card(2, "B", "Región de Valparaíso", "Viña del Mar", None),
            card(3, "C", "Región del Biobío", "Concepción", None),
        ];

        let region = FilterState { region: "Región de Valparaíso".to_string(), ..Default::default() };
        assert_eq!(region.apply(&cards).len(), 2);

        let commune = FilterState {
            region: "Región de Valparaíso".to_string(),
            commune: "Viña del Mar".to_string(),
            ..Default::default()
        };
        assert_eq!(commune.apply(&cards)[0].id, EntityId::Number(2));

        let unaccented = FilterState { region: "Region de Valparaiso".to_string(), ..Default::default() };
        assert!(unaccented.apply(&cards).is_empty());
    }

    #[test]
    fn test_price_ceiling_is_inclusive_and_invites_always_pass() {
        let cards = vec![
            card(1, "A", "R", "C", Some(CardPrice::Amount(7000.0))),
            card(2, "B", "R", "C", Some(CardPrice::Amount(15000.0))),
            card(3, "C", "R", "C", Some(CardPrice::Label("Solo invitados".to_string()))),
        ];

        let state = FilterState { price_ceiling: 7000.0, ..Default::default() };
        let ids: Vec<_> = state.apply(&cards).iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, vec![EntityId::Number(1), EntityId::Number(3)]);

        let zero = FilterState { price_ceiling: 0.0, ..Default::default() };
        assert_eq!(zero.apply(&cards).len(), 1);
    }

    #[test]
    fn test_category_filter_defaults_to_other() {
        let mut concert = card(1, "A", "R", "C", None);
        concert.category = Some(Category::Concert);
        let uncategorized = card(2, "B", "R", "C", None);
        let cards = vec![concert, uncategorized];

        let other = FilterState { category: CategoryFilter::Only(Category::Other), ..Default::default() };
        assert_eq!(other.apply(&cards)[0].id, EntityId::Number(2));

        let concerts = FilterState { category: CategoryFilter::Only(Category::Concert), ..Default::default() };
        assert_eq!(concerts.apply(&cards)[0].id, EntityId::Number(1));

        assert_eq!(FilterState::default().apply(&cards).len(), 2);
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let cards: Vec<EventCard> = (1..=6)
            .map(|i| card(i, &format!("Show {}", i), "R", "C", Some(CardPrice::Amount((i * 1000) as f64))))
            .collect();

        let state = FilterState { price_ceiling: 4000.0, ..Default::default() };
        let ids: Vec<_> = state.apply(&cards).iter().map(|c| c.id.clone()).collect();
        let expected: Vec<EntityId> = (1..=4).map(EntityId::Number).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_is_active() {
        assert!(!FilterState::default().is_active(DEFAULT_PRICE_CEILING));
        let state = FilterState { price_ceiling: 5000.0, ..Default::default() };
        assert!(state.is_active(DEFAULT_PRICE_CEILING));
        let state = FilterState { category: CategoryFilter::Only(Category::Fair), ..Default::default() };
        assert!(state.is_active(DEFAULT_PRICE_CEILING));
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse("todos"), Some(CategoryFilter::All));
        assert_eq!(CategoryFilter::parse("fiesta"), Some(CategoryFilter::Only(Category::Party)));
        assert_eq!(CategoryFilter::parse("nope"), None);
    }
}
