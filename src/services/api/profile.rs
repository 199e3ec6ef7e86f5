//! Profile of the signed-in user

use reqwest::Method;
use serde_json::Value;
use crate::models::{ChangePasswordRequest, UpdateProfileRequest, UserProfile};
use crate::utils::errors::{ApiError, ApiResult};
use super::client::ApiClient;

fn parse_profile(raw: &Value) -> ApiResult<UserProfile> {
    UserProfile::from_value(raw).ok_or_else(|| ApiError::InvalidResponse("invalid profile".to_string()))
}

impl ApiClient {
    /// Look a user up by email; `None` when the backend answers 404
    pub async fn get_user_by_email(&self, email: &str) -> ApiResult<Option<UserProfile>> {
        let path = format!("/api/users/by-email?email={}", urlencoding::encode(email));
        match self.call(Method::GET, &path, None, false, "Could not load the profile").await {
            Ok(raw) => parse_profile(&raw).map(Some),
            Err(e) if e.status() == Some(404) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn get_my_profile(&self) -> ApiResult<UserProfile> {
        let raw = self
            .call(Method::GET, "/api/users/me", None, true, "Could not load the profile")
            .await?;
        parse_profile(&raw)
    }

    /// Save the editable fields and return the profile as stored
    pub async fn update_profile(&self, payload: &UpdateProfileRequest) -> ApiResult<UserProfile> {
        self.call_with(Method::PUT, "/api/users/me", payload, true, "Could not update the profile")
            .await?;
        self.get_my_profile().await
    }

    pub async fn change_password(&self, payload: &ChangePasswordRequest) -> ApiResult<()> {
        self.call_with(
            Method::PUT,
            "/api/users/me/password",
            payload,
            true,
            "Could not change the password",
        )
        .await?;
        Ok(())
    }

    pub async fn delete_account(&self) -> ApiResult<()> {
        self.call(Method::DELETE, "/api/users/me", None, true, "Could not delete the account")
            .await?;
        Ok(())
    }
}
