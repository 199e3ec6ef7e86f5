//! Event registration and creation

use reqwest::Method;
use crate::models::CreateEventRequest;
use crate::utils::errors::ApiResult;
use super::client::ApiClient;

impl ApiClient {
    pub async fn register_to_event(&self, event_id: i64) -> ApiResult<()> {
        self.call(
            Method::POST,
            &format!("/api/events/{}/register", event_id),
            None,
            true,
            "Could not register to the event",
        )
        .await?;
        Ok(())
    }

    pub async fn create_event(&self, payload: &CreateEventRequest) -> ApiResult<()> {
        self.call_with(Method::POST, "/api/events", payload, true, "Could not create the event")
            .await?;
        Ok(())
    }
}
