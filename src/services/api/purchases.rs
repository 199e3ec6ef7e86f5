//! Purchase and attendance history
//!
//! Best-effort: a failed call or a malformed body yields an empty list.

use reqwest::Method;
use tracing::warn;
use crate::models::purchase::parse_list;
use crate::models::{AttendedEvent, Purchase};
use super::client::ApiClient;

impl ApiClient {
    pub async fn purchase_history(&self) -> Vec<Purchase> {
        match self
            .call(Method::GET, "/api/users/me/purchases", None, true, "Could not load purchases")
            .await
        {
            Ok(raw) => parse_list(&raw, Purchase::from_value),
            Err(e) => {
                warn!(error = %e, "Purchase history unavailable");
                Vec::new()
            }
        }
    }

    pub async fn last_attended_events(&self) -> Vec<AttendedEvent> {
        match self
            .call(Method::GET, "/api/users/me/attended", None, true, "Could not load attended events")
            .await
        {
            Ok(raw) => parse_list(&raw, AttendedEvent::from_value),
            Err(e) => {
                warn!(error = %e, "Attended events unavailable");
                Vec::new()
            }
        }
    }
}
