//! Services module
//!
//! This module contains the event discovery pipeline and the backend client

pub mod api;
pub mod dashboard;
pub mod filter;
pub mod geo;
pub mod listing;
pub mod pagination;

// Re-export commonly used services
pub use api::{ApiClient, UpsertOutcome};
pub use dashboard::UserDashboard;
pub use filter::{normalize_price, CategoryFilter, FilterState, DEFAULT_PRICE_CEILING, INVITE_ONLY_PRICE};
pub use geo::{CommuneIndex, DatasetSource, GeoService};
pub use listing::{EventListing, ListingView};
pub use pagination::{build_page_list, Page, PageItem, PAGE_SIZE};

use crate::config::settings::Settings;
use crate::state::SessionHolder;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub api: ApiClient,
    pub geo: GeoService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings, session: SessionHolder) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(&settings.api, session)?,
            geo: GeoService::new(&settings.geo, &settings.api.user_agent)?,
        })
    }

    pub fn session(&self) -> &SessionHolder {
        self.api.session()
    }
}
