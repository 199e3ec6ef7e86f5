//! Access-control gates
//!
//! Two independent checks guard the admin panel: a role gate comparing the
//! user's hierarchical role against a minimum, and a feature gate asking
//! whether the user's commercial plan includes a named capability. Both are
//! pure predicates; [`gate`] turns their outcome into what a region of the
//! panel renders.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::models::{CurrentUser, Plan, Role};
use crate::utils::errors::{CuponmeError, Result};
use crate::utils::logging::log_access_denied;

/// Plan capabilities the panel checks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKey {
    #[serde(rename = "users.manage")]
    UsersManage,
    #[serde(rename = "events.manage")]
    EventsManage,
    #[serde(rename = "carousel.manage")]
    CarouselManage,
    #[serde(rename = "reports.view")]
    ReportsView,
    #[serde(rename = "billing.access")]
    BillingAccess,
}

impl FeatureKey {
    pub const COUNT: usize = 5;

    pub const ALL: [FeatureKey; FeatureKey::COUNT] = [
        FeatureKey::UsersManage,
        FeatureKey::EventsManage,
        FeatureKey::CarouselManage,
        FeatureKey::ReportsView,
        FeatureKey::BillingAccess,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKey::UsersManage => "users.manage",
            FeatureKey::EventsManage => "events.manage",
            FeatureKey::CarouselManage => "carousel.manage",
            FeatureKey::ReportsView => "reports.view",
            FeatureKey::BillingAccess => "billing.access",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value.trim())
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether a plan includes a feature
pub trait FeatureCheck {
    fn allows(&self, plan: Plan, feature: FeatureKey) -> bool;
}

impl<F> FeatureCheck for F
where
    F: Fn(Plan, FeatureKey) -> bool,
{
    fn allows(&self, plan: Plan, feature: FeatureKey) -> bool {
        self(plan, feature)
    }
}

/// Static plan to feature grants, indexed by plan then feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureTable {
    grants: [[bool; FeatureKey::COUNT]; 4],
}

impl FeatureTable {
    /// No plan grants anything
    pub const fn empty() -> Self {
        Self {
            grants: [[false; FeatureKey::COUNT]; 4],
        }
    }

    /// Grants used by the feature gate
    pub fn standard() -> Self {
        use FeatureKey::*;
        Self::empty()
            .with_grants(Plan::Free, &[EventsManage])
            .with_grants(Plan::Basic, &[EventsManage, ReportsView])
            .with_grants(Plan::Premium, &[EventsManage, ReportsView, CarouselManage])
            .with_grants(Plan::Gold, &FeatureKey::ALL)
    }

    /// Grants used by the panel navigation: the standard table plus billing
    /// for every plan, so any plan can reach the billing tab to upgrade.
    pub fn panel() -> Self {
        Plan::ALL
            .into_iter()
            .fold(Self::standard(), |table, plan| table.with_grant(plan, FeatureKey::BillingAccess))
    }

    pub fn with_grant(mut self, plan: Plan, feature: FeatureKey) -> Self {
        self.grants[plan.index()][feature.index()] = true;
        self
    }

    pub fn with_grants(self, plan: Plan, features: &[FeatureKey]) -> Self {
        features.iter().fold(self, |table, f| table.with_grant(plan, *f))
    }

    pub fn without_grant(mut self, plan: Plan, feature: FeatureKey) -> Self {
        self.grants[plan.index()][feature.index()] = false;
        self
    }

    /// Features granted to `plan`, in declaration order
    pub fn features_of(&self, plan: Plan) -> Vec<FeatureKey> {
        FeatureKey::ALL
            .into_iter()
            .filter(|f| self.allows(plan, *f))
            .collect()
    }
}

impl Default for FeatureTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl FeatureCheck for FeatureTable {
    fn allows(&self, plan: Plan, feature: FeatureKey) -> bool {
        self.grants[plan.index()][feature.index()]
    }
}

/// Usage limits attached to each plan; `None` means unlimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    pub events_per_month: Option<u32>,
    pub max_carousel_images: Option<u32>,
}

impl PlanLimits {
    pub fn for_plan(plan: Plan) -> Self {
        let (events_per_month, max_carousel_images) = match plan {
            Plan::Free => (Some(0), Some(0)),
            Plan::Basic => (Some(5), Some(0)),
            Plan::Premium => (None, Some(10)),
            Plan::Gold => (None, Some(50)),
        };
        Self {
            events_per_month,
            max_carousel_images,
        }
    }
}

/// `role` meets or exceeds `min`
pub fn has_role(role: Role, min: Role) -> bool {
    role >= min
}

/// Why a gate refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    SignInRequired,
    InsufficientRole { required: Role },
    FeatureLocked { plan: Plan, feature: FeatureKey },
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::SignInRequired => f.write_str("sign-in required"),
            Denial::InsufficientRole { required } => write!(f, "requires role {} or higher", required),
            Denial::FeatureLocked { plan, feature } => write!(f, "plan {} lacks {}", plan, feature),
        }
    }
}

impl From<Denial> for CuponmeError {
    fn from(denial: Denial) -> Self {
        CuponmeError::PermissionDenied(denial.to_string())
    }
}

/// Role gate: signed in and ranked at least `min`
pub fn check_role(user: Option<&CurrentUser>, min: Role) -> std::result::Result<(), Denial> {
    let user = user.ok_or(Denial::SignInRequired)?;
    if has_role(user.role, min) {
        Ok(())
    } else {
        Err(Denial::InsufficientRole { required: min })
    }
}

/// Feature gate: signed in, and either superadmin or on a plan that grants
/// `feature`
pub fn check_feature(
    user: Option<&CurrentUser>,
    feature: FeatureKey,
    check: &impl FeatureCheck,
) -> std::result::Result<(), Denial> {
    let user = user.ok_or(Denial::SignInRequired)?;
    if user.role == Role::SuperAdmin || check.allows(user.plan, feature) {
        Ok(())
    } else {
        Err(Denial::FeatureLocked {
            plan: user.plan,
            feature,
        })
    }
}

/// Role gate as a crate error, for callers that propagate with `?`
pub fn require_role(user: Option<&CurrentUser>, min: Role) -> Result<()> {
    check_role(user, min).map_err(|denial| {
        log_access_denied("role", user.map(|u| u.id.as_str()), &denial.to_string());
        denial.into()
    })
}

/// Feature gate as a crate error, for callers that propagate with `?`
pub fn require_feature(user: Option<&CurrentUser>, feature: FeatureKey, check: &impl FeatureCheck) -> Result<()> {
    check_feature(user, feature, check).map_err(|denial| {
        log_access_denied("feature", user.map(|u| u.id.as_str()), &denial.to_string());
        denial.into()
    })
}

/// Placeholder shown where gated content would be
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockedView {
    pub title: String,
    pub message: String,
    pub action_label: Option<String>,
    pub action_href: Option<String>,
}

impl Default for LockedView {
    fn default() -> Self {
        Self {
            title: "Restricted access".to_string(),
            message: "You do not have permission to view this content.".to_string(),
            action_label: None,
            action_href: None,
        }
    }
}

impl LockedView {
    fn with_action(title: &str, message: String, label: &str, href: &str) -> Self {
        Self {
            title: title.to_string(),
            message,
            action_label: Some(label.to_string()),
            action_href: Some(href.to_string()),
        }
    }

    /// Default placeholder for a refusal
    pub fn for_denial(denial: &Denial) -> Self {
        match denial {
            Denial::SignInRequired => Self::with_action(
                "You must sign in",
                "Sign in to continue.".to_string(),
                "Go to sign in",
                "/login",
            ),
            Denial::InsufficientRole { required } => Self::with_action(
                "Insufficient privileges",
                format!("This section requires the {} role or higher.", required),
                "Back to home",
                "/",
            ),
            Denial::FeatureLocked { plan, .. } => Self::with_action(
                "Feature locked",
                format!("Your plan ({}) does not include this feature.", plan),
                "See plans",
                "/pricing",
            ),
        }
    }
}

/// What a gated region renders
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered<T> {
    Children(T),
    Fallback(T),
    Locked(LockedView),
}

impl<T> Rendered<T> {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Rendered::Children(_))
    }
}

/// Render `children` when `outcome` allows it; otherwise the caller's
/// `fallback` if given, else the default locked view.
pub fn gate<T>(outcome: std::result::Result<(), Denial>, children: T, fallback: Option<T>) -> Rendered<T> {
    match outcome {
        Ok(()) => Rendered::Children(children),
        Err(denial) => match fallback {
            Some(fallback) => Rendered::Fallback(fallback),
            None => Rendered::Locked(LockedView::for_denial(&denial)),
        },
    }
}

/// Admin panel tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavKey {
    Dashboard,
    Events,
    Carousel,
    Users,
    Reports,
    Billing,
    Settings,
}

impl NavKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavKey::Dashboard => "dashboard",
            NavKey::Events => "events",
            NavKey::Carousel => "carousel",
            NavKey::Users => "users",
            NavKey::Reports => "reports",
            NavKey::Billing => "billing",
            NavKey::Settings => "settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub key: NavKey,
    pub label: &'static str,
    pub min_role: Option<Role>,
    pub required_feature: Option<FeatureKey>,
}

pub const NAV_ITEMS: [NavItem; 7] = [
    NavItem { key: NavKey::Dashboard, label: "Dashboard", min_role: None, required_feature: None },
    NavItem { key: NavKey::Events, label: "Events", min_role: None, required_feature: Some(FeatureKey::EventsManage) },
    NavItem { key: NavKey::Carousel, label: "Carousel", min_role: None, required_feature: Some(FeatureKey::CarouselManage) },
    NavItem { key: NavKey::Users, label: "Users", min_role: Some(Role::Admin), required_feature: None },
    NavItem { key: NavKey::Reports, label: "Reports", min_role: None, required_feature: Some(FeatureKey::ReportsView) },
    NavItem { key: NavKey::Billing, label: "Billing", min_role: None, required_feature: Some(FeatureKey::BillingAccess) },
    NavItem { key: NavKey::Settings, label: "Settings", min_role: Some(Role::Member), required_feature: None },
];

impl NavItem {
    pub fn find(key: NavKey) -> &'static NavItem {
        // every key has exactly one entry
        &NAV_ITEMS[key as usize]
    }
}

/// Whether `user` may open `item`; superadmins skip the feature requirement
pub fn can_access(item: &NavItem, user: &CurrentUser, check: &impl FeatureCheck) -> bool {
    let role_ok = item.min_role.map_or(true, |min| has_role(user.role, min));
    let feature_ok = item
        .required_feature
        .map_or(true, |feature| check.allows(user.plan, feature));

    if user.role == Role::SuperAdmin {
        role_ok
    } else {
        role_ok && feature_ok
    }
}

/// One navigation entry as drawn, locked entries included
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub key: NavKey,
    pub label: &'static str,
    pub accessible: bool,
}

/// The panel navigation for `user`
pub fn navigation(user: &CurrentUser, check: &impl FeatureCheck) -> Vec<NavEntry> {
    NAV_ITEMS
        .iter()
        .map(|item| NavEntry {
            key: item.key,
            label: item.label,
            accessible: can_access(item, user, check),
        })
        .collect()
}

/// Gate a whole panel tab with its role and feature requirements
pub fn check_tab(user: Option<&CurrentUser>, key: NavKey, check: &impl FeatureCheck) -> std::result::Result<(), Denial> {
    let item = NavItem::find(key);
    if let Some(min) = item.min_role {
        check_role(user, min)?;
    }
    match item.required_feature {
        Some(feature) => check_feature(user, feature, check),
        None => user.map(|_| ()).ok_or(Denial::SignInRequired),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn user(role: Role, plan: Plan) -> CurrentUser {
        CurrentUser {
            id: "u1".to_string(),
            full_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            role,
            plan,
        }
    }

    #[test]
    fn test_role_gate() {
        let member = user(Role::Member, Plan::Gold);
        let admin = user(Role::Admin, Plan::Free);

        assert_matches!(
            check_role(Some(&member), Role::Admin),
            Err(Denial::InsufficientRole { required: Role::Admin })
        );
        assert!(check_role(Some(&admin), Role::Admin).is_ok());
        assert!(check_role(Some(&admin), Role::Member).is_ok());
        assert_matches!(check_role(None, Role::User), Err(Denial::SignInRequired));
    }

    #[test]
    fn test_revoked_grant_locks_feature() {
        let table = FeatureTable::standard().without_grant(Plan::Gold, FeatureKey::ReportsView);
        let gold_admin = user(Role::Admin, Plan::Gold);

        assert_matches!(
            check_feature(Some(&gold_admin), FeatureKey::ReportsView, &table),
            Err(Denial::FeatureLocked { plan: Plan::Gold, feature: FeatureKey::ReportsView })
        );
        assert!(check_feature(Some(&gold_admin), FeatureKey::CarouselManage, &table).is_ok());
        assert!(!table.features_of(Plan::Gold).contains(&FeatureKey::ReportsView));
        assert!(table.features_of(Plan::Basic).contains(&FeatureKey::ReportsView));
    }

    #[test]
    fn test_feature_gate() {
        let table = FeatureTable::standard();
        let free = user(Role::Admin, Plan::Free);
        let root = user(Role::SuperAdmin, Plan::Free);

        assert!(check_feature(Some(&free), FeatureKey::EventsManage, &table).is_ok());
        assert_matches!(
            check_feature(Some(&free), FeatureKey::CarouselManage, &table),
            Err(Denial::FeatureLocked { plan: Plan::Free, feature: FeatureKey::CarouselManage })
        );
        for feature in FeatureKey::ALL {
            assert!(check_feature(Some(&root), feature, &table).is_ok());
        }
        assert_matches!(check_feature(None, FeatureKey::EventsManage, &table), Err(Denial::SignInRequired));
    }

    #[test]
    fn test_standard_table() {
        let table = FeatureTable::standard();
        assert_eq!(table.features_of(Plan::Free), vec![FeatureKey::EventsManage]);
        assert_eq!(
            table.features_of(Plan::Basic),
            vec![FeatureKey::EventsManage, FeatureKey::ReportsView]
        );
        assert_eq!(
            table.features_of(Plan::Premium),
            vec![FeatureKey::EventsManage, FeatureKey::CarouselManage, FeatureKey::ReportsView]
        );
        assert_eq!(table.features_of(Plan::Gold).len(), FeatureKey::COUNT);
    }

    #[test]
    fn test_injected_closure_check() {
        let nothing = |_: Plan, _: FeatureKey| false;
        let gold = user(Role::Admin, Plan::Gold);
        assert!(check_feature(Some(&gold), FeatureKey::ReportsView, &nothing).is_err());
    }

    #[test]
    fn test_gate_rendering() {
        let rendered = gate(Err(Denial::SignInRequired), "panel", None);
        assert_matches!(&rendered, Rendered::Locked(view) if view.action_href.as_deref() == Some("/login"));

        assert_eq!(gate(Err(Denial::SignInRequired), "panel", Some("nope")), Rendered::Fallback("nope"));
        assert!(gate(Ok(()), "panel", None).is_allowed());

        let locked = LockedView::for_denial(&Denial::FeatureLocked {
            plan: Plan::Basic,
            feature: FeatureKey::CarouselManage,
        });
        assert!(locked.message.contains("basic"));
        assert_eq!(locked.action_href.as_deref(), Some("/pricing"));
    }

    #[test]
    fn test_navigation() {
        let table = FeatureTable::panel();
        let member_free = user(Role::Member, Plan::Free);
        let accessible: Vec<NavKey> = navigation(&member_free, &table)
            .into_iter()
            .filter(|e| e.accessible)
            .map(|e| e.key)
            .collect();
        assert_eq!(
            accessible,
            vec![NavKey::Dashboard, NavKey::Events, NavKey::Billing, NavKey::Settings]
        );

        let root = user(Role::SuperAdmin, Plan::Free);
        assert!(navigation(&root, &table).iter().all(|e| e.accessible));

        let plain = user(Role::User, Plan::Gold);
        assert!(!can_access(NavItem::find(NavKey::Users), &plain, &table));
        assert!(can_access(NavItem::find(NavKey::Carousel), &plain, &table));
    }

    #[test]
    fn test_nav_items_indexed_by_key() {
        for item in NAV_ITEMS.iter() {
            assert_eq!(NavItem::find(item.key).key, item.key);
        }
    }

    #[test]
    fn test_check_tab() {
        let table = FeatureTable::standard();
        let admin_basic = user(Role::Admin, Plan::Basic);
        assert!(check_tab(Some(&admin_basic), NavKey::Users, &table).is_ok());
        assert!(check_tab(Some(&admin_basic), NavKey::Reports, &table).is_ok());
        assert!(check_tab(Some(&admin_basic), NavKey::Carousel, &table).is_err());
        assert_matches!(check_tab(None, NavKey::Dashboard, &table), Err(Denial::SignInRequired));
    }

    #[test]
    fn test_require_role_maps_to_permission_denied() {
        let result = require_role(Some(&user(Role::User, Plan::Free)), Role::Admin);
        assert_matches!(result, Err(CuponmeError::PermissionDenied(_)));
    }

    #[test]
    fn test_feature_key_parse() {
        assert_eq!(FeatureKey::parse("reports.view"), Some(FeatureKey::ReportsView));
        assert_eq!(FeatureKey::parse("nope"), None);
    }

    #[test]
    fn test_plan_limits() {
        assert_eq!(PlanLimits::for_plan(Plan::Basic).events_per_month, Some(5));
        assert_eq!(PlanLimits::for_plan(Plan::Gold).events_per_month, None);
    }
}
