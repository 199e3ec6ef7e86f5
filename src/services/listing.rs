//! Event listing view-model
//!
//! Owns the card collection, the filter state and the current page. Every
//! filter change recomputes the results and sends the user back to page 1.

use serde::Serialize;
use crate::config::ListingConfig;
use crate::models::EventCard;
use crate::services::filter::{CategoryFilter, FilterState};
use crate::services::geo::CommuneIndex;
use crate::services::pagination::{self, PageItem};
use crate::utils::logging::log_filter_applied;

/// What the listing grid renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView<'a> {
    pub items: Vec<&'a EventCard>,
    pub page: usize,
    pub total_pages: usize,
    pub total_results: usize,
    /// `None` when the page controls are hidden
    pub page_list: Option<Vec<PageItem>>,
    pub filters_active: bool,
}

#[derive(Debug, Clone)]
pub struct EventListing {
    base: Vec<EventCard>,
    cards: Vec<EventCard>,
    filters: FilterState,
    default_ceiling: f64,
    page_size: usize,
    page: usize,
    /// Indices into `cards` of the filtered results
    matches: Vec<usize>,
}

impl EventListing {
    pub fn new(cards: Vec<EventCard>, config: &ListingConfig) -> Self {
        let mut listing = Self {
            base: cards.clone(),
            cards,
            filters: FilterState::with_ceiling(config.max_price),
            default_ceiling: config.max_price,
            page_size: config.page_size.max(1),
            page: 1,
            matches: Vec::new(),
        };
        listing.recompute();
        listing
    }

    /// Replace regions from the commune index; the original cards are kept
    /// so a later index is applied to them rather than to enriched copies.
    pub fn apply_geo(&mut self, index: &CommuneIndex) {
        self.cards = index.enrich(&self.base);
        self.recompute();
    }

    pub fn cards(&self) -> &[EventCard] {
        &self.cards
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.page = 1;
        self.recompute();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let mut filters = self.filters.clone();
        filters.query = query.into();
        self.set_filters(filters);
    }

    /// Select a region; the commune selection is cleared with it
    pub fn set_region(&mut self, region: impl Into<String>) {
        let mut filters = self.filters.clone();
        filters.region = region.into();
        filters.commune.clear();
        self.set_filters(filters);
    }

    pub fn set_commune(&mut self, commune: impl Into<String>) {
        let mut filters = self.filters.clone();
        filters.commune = commune.into();
        self.set_filters(filters);
    }

    pub fn set_price_ceiling(&mut self, ceiling: f64) {
        let mut filters = self.filters.clone();
        filters.price_ceiling = ceiling;
        self.set_filters(filters);
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        let mut filters = self.filters.clone();
        filters.category = category;
        self.set_filters(filters);
    }

    /// Back to the permissive defaults
    pub fn reset_filters(&mut self) {
        self.set_filters(FilterState::with_ceiling(self.default_ceiling));
    }

    /// Jump to `page`, clamped to the available pages
    pub fn goto(&mut self, page: usize) {
        self.page = pagination::clamp_page(page, self.total_pages());
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.matches.len(), self.page_size)
    }

    /// Every filtered card in order
    pub fn results(&self) -> Vec<&EventCard> {
        self.matches.iter().map(|&i| &self.cards[i]).collect()
    }

    pub fn view(&self) -> ListingView<'_> {
        let total_results = self.matches.len();
        let total_pages = self.total_pages();
        let page = pagination::clamp_page(self.page, total_pages);

        let items = pagination::page_slice(&self.matches, page, self.page_size)
            .iter()
            .map(|&i| &self.cards[i])
            .collect();

        ListingView {
            items,
            page,
            total_pages,
            total_results,
            page_list: pagination::should_render_controls(total_results, self.page_size)
                .then(|| pagination::build_page_list(page, total_pages)),
            filters_active: self.filters.is_active(self.default_ceiling),
        }
    }

    fn recompute(&mut self) {
        self.matches = self
            .cards
            .iter()
            .enumerate()
            .filter(|(_, card)| self.filters.matches(card))
            .map(|(i, _)| i)
            .collect();
        self.page = pagination::clamp_page(self.page, self.total_pages());

        log_filter_applied(
            self.cards.len(),
            self.matches.len(),
            self.filters.is_active(self.default_ceiling),
        );
    }
}
