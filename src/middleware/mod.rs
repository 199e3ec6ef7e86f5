//! Middleware module
//!
//! Access-control gates for the admin panel and the admin route guard

pub mod access;
pub mod route_guard;

// Re-export commonly used middleware
pub use access::{
    can_access, check_feature, check_role, check_tab, gate, has_role, navigation, require_feature, require_role,
    Denial, FeatureCheck, FeatureKey, FeatureTable, LockedView, NavEntry, NavItem, NavKey, PlanLimits, Rendered,
    NAV_ITEMS,
};
pub use route_guard::{RouteDecision, RouteGuard};
