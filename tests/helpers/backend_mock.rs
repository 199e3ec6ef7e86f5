//! Mock ticketing backend for testing
//!
//! Wraps a wiremock server that answers the backend endpoints the API
//! client calls, plus a static GeoJSON dataset for the geo loader.

use cuponme::config::{ApiConfig, GeoConfig};
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const GEO_DATASET_PATH: &str = "/data/comunas.geojson";

/// Mock backend server for testing
pub struct BackendMockServer {
    pub server: MockServer,
    pub base_url: String,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub status: u16,
    pub delay_ms: Option<u64>,
    pub custom_response: Option<Value>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            status: 200,
            delay_ms: None,
            custom_response: None,
        }
    }
}

impl MockResponseConfig {
    pub fn with_body(body: Value) -> Self {
        Self {
            custom_response: Some(body),
            ..Self::default()
        }
    }

    pub fn failing(status: u16, body: Value) -> Self {
        Self {
            status,
            delay_ms: None,
            custom_response: Some(body),
        }
    }

    fn template(self, default_body: Value) -> ResponseTemplate {
        let mut response = ResponseTemplate::new(self.status)
            .set_body_json(self.custom_response.unwrap_or(default_body));
        if let Some(delay) = self.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }
        response
    }
}

impl BackendMockServer {
    /// Start a new mock backend
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let base_url = server.uri();

        Self { server, base_url }
    }

    /// API settings pointing at this server
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            timeout_seconds: 5,
            ..ApiConfig::default()
        }
    }

    /// Geo settings pointing at the mocked dataset
    pub fn geo_config(&self) -> GeoConfig {
        GeoConfig {
            dataset: format!("{}{}", self.base_url, GEO_DATASET_PATH),
            timeout_seconds: 5,
        }
    }

    /// Setup mock for the login endpoint
    pub async fn mock_login(&self, config: MockResponseConfig) {
        let default_body = json!({
            "token": "tok-123",
            "fullName": "Ana Pérez",
            "role": "admin",
            "plan": "premium"
        });

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(config.template(default_body))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for the lookup by email
    pub async fn mock_user_by_email(&self, email: &str, config: MockResponseConfig) {
        Mock::given(method("GET"))
            .and(path("/api/users/by-email"))
            .and(query_param("email", email))
            .respond_with(config.template(profile_json(email)))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for any endpoint; the default body is `{}`
    pub async fn mock_endpoint(&self, http_method: &str, endpoint: &str, config: MockResponseConfig) {
        Mock::given(method(http_method))
            .and(path(endpoint))
            .respond_with(config.template(json!({})))
            .mount(&self.server)
            .await;
    }

    /// Serve the fixture region/commune dataset
    pub async fn mock_geo_dataset(&self, config: MockResponseConfig) {
        Mock::given(method("GET"))
            .and(path(GEO_DATASET_PATH))
            .respond_with(config.template(super::test_data::geo_collection_json()))
            .mount(&self.server)
            .await;
    }

    /// Serve a dataset that is not JSON
    pub async fn mock_geo_garbage(&self) {
        Mock::given(method("GET"))
            .and(path(GEO_DATASET_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&self.server)
            .await;
    }

    /// Reset all mocks
    pub async fn reset(&self) {
        self.server.reset().await;
    }

    /// Requests received for `endpoint` with `http_method`
    pub async fn requests_to(&self, http_method: &str, endpoint: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.method.as_str() == http_method && req.url.path() == endpoint)
            .collect()
    }

    /// Verify that a specific endpoint was called
    pub async fn verify_endpoint_called(&self, http_method: &str, endpoint: &str, times: usize) {
        let matching_requests = self.requests_to(http_method, endpoint).await.len();

        assert_eq!(
            matching_requests, times,
            "Expected {} {} calls to {}, but got {}",
            times, http_method, endpoint, matching_requests
        );
    }
}

/// Profile body as the backend sends it
pub fn profile_json(email: &str) -> Value {
    json!({
        "email": email,
        "fullName": "Ana Pérez",
        "userName": "anap",
        "phone": "+56912345678",
        "rut": "12.345.678-5",
        "birthDate": "1990-04-12",
        "role": "admin",
        "plan": "premium"
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_backend_mock_server_creation() {
        let mock_server = BackendMockServer::new().await;
        assert!(mock_server.base_url.starts_with("http://"));
        assert!(mock_server.geo_config().dataset.ends_with(GEO_DATASET_PATH));
    }
}
