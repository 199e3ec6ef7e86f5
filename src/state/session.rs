//! Session holder
//!
//! Created once at startup from storage and passed to whatever needs the
//! signed-in user: the access gates, the API client and the route guard's
//! cookie mirror. Changes are broadcast on a `watch` channel.

use std::sync::Arc;
use cookie::{Cookie, SameSite};
use tokio::sync::watch;
use crate::models::{CurrentUser, StoredSession};
use crate::utils::errors::Result;
use crate::utils::logging::log_session_change;
use super::storage::{SessionStore, StorageTier};

pub const EMAIL_COOKIE: &str = "email";
pub const ROLE_COOKIE: &str = "role";

#[derive(Debug, Clone)]
pub struct SessionHolder {
    store: Arc<SessionStore>,
    tx: Arc<watch::Sender<Option<StoredSession>>>,
}

impl SessionHolder {
    /// Restore whatever session the store holds
    pub async fn load(store: SessionStore) -> Self {
        let initial = store.load().await;
        if let Some(session) = &initial {
            log_session_change("restored", session.email.as_deref(), Some(session.role.as_str()));
        }

        let (tx, _rx) = watch::channel(initial);
        Self {
            store: Arc::new(store),
            tx: Arc::new(tx),
        }
    }

    /// Holder with no session and nothing stored
    pub fn empty(store: SessionStore) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            store: Arc::new(store),
            tx: Arc::new(tx),
        }
    }

    pub async fn login(&self, session: StoredSession, remember: bool) -> Result<()> {
        self.store
            .save(&session, StorageTier::from_remember(remember))
            .await?;
        log_session_change("login", session.email.as_deref(), Some(session.role.as_str()));
        self.tx.send_replace(Some(session));
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        self.store.clear().await?;
        let previous = self.tx.send_replace(None);
        log_session_change(
            "logout",
            previous.as_ref().and_then(|s| s.email.as_deref()),
            None,
        );
        Ok(())
    }

    pub fn current(&self) -> Option<StoredSession> {
        self.tx.borrow().clone()
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.tx.borrow().as_ref().map(StoredSession::current_user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Receive every subsequent login and logout
    pub fn subscribe(&self) -> watch::Receiver<Option<StoredSession>> {
        self.tx.subscribe()
    }

    /// `Authorization` and `X-Email` headers for authenticated calls
    pub fn auth_headers(&self) -> Vec<(&'static str, String)> {
        let guard = self.tx.borrow();
        let Some(session) = guard.as_ref() else {
            return Vec::new();
        };

        let mut headers = vec![("Authorization", format!("Bearer {}", session.token))];
        if let Some(email) = session.email.as_deref().filter(|e| !e.is_empty()) {
            headers.push(("X-Email", email.to_string()));
        }
        headers
    }

    /// Cookies mirroring the session for the route guard
    pub fn cookies(&self) -> Vec<Cookie<'static>> {
        mirror_cookies(self.tx.borrow().as_ref())
    }

    /// `Cookie` request header built from the mirrored cookies
    pub fn cookie_header(&self) -> String {
        self.cookies()
            .iter()
            .filter(|c| !c.value().is_empty())
            .map(|c| c.stripped().to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Email and role cookies for `session`, or expired ones after a logout
pub fn mirror_cookies(session: Option<&StoredSession>) -> Vec<Cookie<'static>> {
    match session {
        Some(session) => {
            let email = session.email.clone().unwrap_or_default();
            vec![
                build_cookie(EMAIL_COOKIE, urlencoding::encode(&email).into_owned()),
                build_cookie(ROLE_COOKIE, urlencoding::encode(&session.role).into_owned()),
            ]
        }
        None => [EMAIL_COOKIE, ROLE_COOKIE]
            .into_iter()
            .map(|name| {
                let mut cookie = build_cookie(name, String::new());
                cookie.make_removal();
                cookie
            })
            .collect(),
    }
}

fn build_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .same_site(SameSite::Lax)
        .build()
}
