//! Admin route guard
//!
//! Requests under the protected prefix pass only when the `role` cookie
//! names a superadmin; everyone else is redirected to the forbidden page.

use cookie::Cookie;
use tracing::debug;
use crate::config::AccessConfig;
use crate::models::Role;
use crate::state::session::ROLE_COOKIE;
use crate::utils::logging::log_access_denied;
use super::access::has_role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Next,
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    protected_prefix: String,
    forbidden_path: String,
}

impl RouteGuard {
    pub fn new(config: &AccessConfig) -> Self {
        Self {
            protected_prefix: config.protected_prefix.trim_end_matches('/').to_string(),
            forbidden_path: config.forbidden_path.clone(),
        }
    }

    /// `path` is the prefix itself or lies below it
    pub fn is_protected(&self, path: &str) -> bool {
        match path.strip_prefix(&self.protected_prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Decide a request from its path and raw `Cookie` header
    pub fn check(&self, path: &str, cookie_header: Option<&str>) -> RouteDecision {
        if !self.is_protected(path) {
            return RouteDecision::Next;
        }

        let role = cookie_header.and_then(role_from_header);
        let allowed = role
            .as_deref()
            .and_then(|r| r.parse::<Role>().ok())
            .is_some_and(|r| has_role(r, Role::SuperAdmin));

        if allowed {
            debug!(path = path, "Admin route allowed");
            RouteDecision::Next
        } else {
            log_access_denied("route", None, &format!("{} requires superadmin", path));
            RouteDecision::Redirect(self.forbidden_path.clone())
        }
    }
}

/// The `role` cookie value, trimmed and lowercased
fn role_from_header(header: &str) -> Option<String> {
    Cookie::split_parse(header)
        .filter_map(|c| c.ok())
        .find(|c| c.name() == ROLE_COOKIE)
        .map(|c| {
            let value = c.value();
            let decoded = urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string());
            decoded.trim().to_lowercase()
        })
}
