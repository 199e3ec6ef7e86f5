//! HTTP plumbing shared by every backend call
//!
//! JSON in, JSON out. A failed status becomes an [`ApiError`] carrying the
//! backend's own message when it sent one; an empty or non-JSON success
//! body reads as `{}`.

use std::time::Duration;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;
use crate::config::ApiConfig;
use crate::state::SessionHolder;
use crate::utils::errors::{ApiError, ApiResult, CuponmeError, Result};
use crate::utils::logging::log_api_error;

/// Error body some endpoints return
#[derive(Debug, Default, Deserialize)]
struct ErrorShape {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Client for the external backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionHolder,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SessionHolder) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(CuponmeError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionHolder {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and return the JSON body.
    ///
    /// With `auth` the session's auth headers are attached when signed in.
    pub(crate) async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        auth: bool,
        fallback: &str,
    ) -> ApiResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, auth = auth, "Calling backend");

        let mut request = self
            .client
            .request(method, &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        if auth {
            for (name, value) in self.session.auth_headers() {
                request = request.header(name, value);
            }
        }

        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                log_api_error(path, None, &e.to_string());
                return Err(e.into());
            }
        };

        let status = response.status();
        let text = response.text().await.map_err(ApiError::from)?;

        if !status.is_success() {
            let shape: ErrorShape = serde_json::from_str(&text).unwrap_or_default();
            let error = ApiError::from_backend(status.as_u16(), shape.message, shape.title, fallback);
            log_api_error(path, Some(status.as_u16()), &error.to_string());
            return Err(error);
        }

        Ok(match serde_json::from_str::<Value>(&text) {
            Ok(Value::Null) | Err(_) => json!({}),
            Ok(value) => value,
        })
    }

    /// [`call`](Self::call) with a serializable body
    pub(crate) async fn call_with<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        auth: bool,
        fallback: &str,
    ) -> ApiResult<Value> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.call(method, path, Some(body), auth, fallback).await
    }
}

/// Decode a response body into `T`
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Decode a list response; anything but an array is an empty list
pub(crate) fn decode_list<T: DeserializeOwned>(value: Value) -> ApiResult<Vec<T>> {
    match value {
        Value::Array(_) => decode(value),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_list_tolerates_empty_body() {
        let items: Vec<i64> = decode_list(json!({})).unwrap();
        assert!(items.is_empty());

        let items: Vec<i64> = decode_list(json!([1, 2])).unwrap();
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn test_decode_reports_shape_errors() {
        let result: ApiResult<Vec<i64>> = decode(json!({"oops": true}));
        assert!(matches!(result, Err(ApiError::InvalidResponse(_))));
    }
}
