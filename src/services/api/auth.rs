//! Sign-up, sign-in and billing calls

use reqwest::Method;
use serde_json::{json, Value};
use tracing::warn;
use crate::models::{CheckoutSession, LoginResponse, Plan, RegisterPayload, RegisterRequestBody, StoredSession};
use crate::utils::errors::{ApiError, ApiResult};
use super::client::{decode, ApiClient};

impl ApiClient {
    pub async fn register(&self, data: &RegisterPayload) -> ApiResult<()> {
        let body = RegisterRequestBody::from(data);
        self.call_with(Method::POST, "/api/auth/register", &body, false, "Could not register")
            .await?;
        Ok(())
    }

    /// Sign in and persist the session.
    ///
    /// `remember` selects the persistent storage tier. A failure to persist
    /// does not fail the login.
    pub async fn login(&self, email: &str, password: &str, remember: bool) -> ApiResult<LoginResponse> {
        let email = email.trim().to_lowercase();
        let raw = self
            .call(
                Method::POST,
                "/api/auth/login",
                Some(json!({ "email": email, "password": password })),
                false,
                "Invalid credentials",
            )
            .await?;

        let parsed = parse_login_response(&raw, &email)?;

        let session = StoredSession {
            token: parsed.token.clone(),
            full_name: parsed.full_name.clone(),
            role: parsed.role.clone(),
            plan: Some(parsed.plan.clone()),
            email: Some(email.clone()),
        };
        if let Err(e) = self.session().login(session, remember).await {
            warn!(email = %email, error = %e, "Failed to persist session");
        }

        Ok(parsed)
    }

    pub async fn select_plan(&self, plan: Plan) -> ApiResult<()> {
        self.call(
            Method::POST,
            "/api/billing/select-plan",
            Some(json!({ "planId": plan })),
            true,
            "Could not select the plan",
        )
        .await?;
        Ok(())
    }

    /// Open a checkout with the payment provider; only paid plans qualify
    pub async fn create_checkout(&self, plan: Plan) -> ApiResult<CheckoutSession> {
        if !plan.is_paid() {
            return Err(ApiError::InvalidRequest(format!("The {} plan has no checkout", plan)));
        }

        let raw = self
            .call(
                Method::POST,
                "/api/billing/create-checkout",
                Some(json!({ "planId": plan })),
                true,
                "Could not start the checkout",
            )
            .await?;
        decode(raw)
    }
}

/// Apply the login response defaults; the token is mandatory
fn parse_login_response(raw: &Value, email: &str) -> ApiResult<LoginResponse> {
    let obj = raw
        .as_object()
        .ok_or_else(|| ApiError::InvalidResponse("login response is not an object".to_string()))?;

    let field = |key: &str| match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    };

    let token = field("token").unwrap_or_default();
    if token.is_empty() {
        return Err(ApiError::InvalidResponse("login response has no token".to_string()));
    }

    let local_part = email.split('@').next().unwrap_or_default().to_string();

    Ok(LoginResponse {
        token,
        full_name: field("fullName").unwrap_or(local_part),
        role: field("role").unwrap_or_else(|| "user".to_string()),
        plan: field("plan").unwrap_or_else(|| "free".to_string()),
    })
}
