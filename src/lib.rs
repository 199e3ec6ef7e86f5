//! Cuponme
//!
//! Client-side core of an event-ticketing site: event discovery (geo
//! enrichment, filtering, pagination), role- and plan-based access control
//! for the admin panel, the signed-in session, form validation and a thin
//! client for the ticketing backend.

pub mod config;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ApiError, CuponmeError, FormError, Result};

// Re-export main components for easy access
pub use middleware::{FeatureTable, RouteGuard};
pub use services::{ApiClient, EventListing, GeoService, ServiceFactory};
pub use state::{SessionHolder, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
