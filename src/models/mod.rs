//! Data models module
//!
//! This module contains all data structures used throughout the crate

pub mod auth;
pub mod carousel;
pub mod event;
pub mod geo;
pub mod plan;
pub mod purchase;
pub mod user;

// Re-export commonly used models
pub use auth::{RegisterPayload, RegisterRequestBody, LoginResponse, StoredSession, CheckoutSession};
pub use carousel::{CarouselItem, UpsertCarouselItemPayload, UpdateCarouselItemPayload, PublicSlide, MoveDirection};
pub use event::{EntityId, EventCard, CardPrice, Category, CreateEventRequest};
pub use geo::{GeoCollection, GeoFeature, GeoProperties};
pub use plan::{PlanDefinition, AdminApiPlan};
pub use purchase::{Purchase, AttendedEvent};
pub use user::{Role, Plan, CurrentUser, UserProfile, UpdateProfileRequest, ChangePasswordRequest, AdminUser};
