//! Authentication and session models

use serde::{Deserialize, Serialize};
use super::user::{CurrentUser, Plan, Role};
use crate::utils::helpers::normalize_rut;

/// Registration data collected by the sign-up form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub full_name: String,
    pub rut: String,
    pub birth_date: Option<String>,
    pub phone_number: String,
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub plan: Option<Plan>,
    pub role: Option<Role>,
}

/// Registration body in the shape the backend expects
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterRequestBody {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub user_name: String,
    pub phone: String,
    pub rut: String,
    pub birth_date: Option<String>,
    pub plan: Option<Plan>,
    pub role: Option<Role>,
}

impl From<&RegisterPayload> for RegisterRequestBody {
    fn from(data: &RegisterPayload) -> Self {
        Self {
            email: data.email.trim().to_lowercase(),
            password: data.password.clone(),
            full_name: data.full_name.trim().to_string(),
            user_name: data.user_name.trim().to_string(),
            phone: data.phone_number.trim().to_string(),
            rut: normalize_rut(&data.rut),
            birth_date: data.birth_date.clone(),
            plan: data.plan,
            role: data.role,
        }
    }
}

/// Login result after defaults have been applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub full_name: String,
    pub role: String,
    pub plan: String,
}

/// Session persisted between visits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub token: String,
    pub full_name: String,
    pub role: String,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl StoredSession {
    /// Project the stored session onto the user model the gates consume.
    ///
    /// Unknown roles degrade to `user` and unknown or absent plans to `free`.
    pub fn current_user(&self) -> CurrentUser {
        let email = self.email.clone().unwrap_or_default();
        CurrentUser {
            id: email.clone(),
            full_name: self.full_name.clone(),
            email,
            role: Role::parse_or_default(&self.role),
            plan: self
                .plan
                .as_deref()
                .map(Plan::parse_or_default)
                .unwrap_or(Plan::Free),
        }
    }
}

/// Checkout session opened with the payment provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub checkout_url: String,
}
