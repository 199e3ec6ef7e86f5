//! User dashboard loader
//!
//! Fetches the profile and both history lists at once. Each part degrades
//! on its own: a failed profile leaves the history visible and vice versa.

use serde::Serialize;
use crate::models::{AttendedEvent, Purchase, UserProfile};
use crate::services::api::ApiClient;
use crate::utils::logging::log_api_error;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDashboard {
    pub profile: Option<UserProfile>,
    /// Message shown in place of the profile when it failed to load
    pub profile_error: Option<String>,
    pub purchases: Vec<Purchase>,
    pub attended: Vec<AttendedEvent>,
}

impl UserDashboard {
    pub async fn load(api: &ApiClient) -> Self {
        let (profile, purchases, attended) = futures::join!(
            api.get_my_profile(),
            api.purchase_history(),
            api.last_attended_events()
        );

        let (profile, profile_error) = match profile {
            Ok(profile) => (Some(profile), None),
            Err(e) => {
                log_api_error("/api/users/me", e.status(), &e.to_string());
                (None, Some(e.user_message()))
            }
        };

        Self {
            profile,
            profile_error,
            purchases,
            attended,
        }
    }

    /// Sum of every purchase line
    pub fn total_spent(&self) -> f64 {
        self.purchases.iter().map(Purchase::total).sum()
    }
}
