//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiConfig,
    pub geo: GeoConfig,
    pub listing: ListingConfig,
    pub session: SessionConfig,
    pub access: AccessConfig,
    pub logging: LoggingConfig,
}

/// External backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Region/commune dataset configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeoConfig {
    /// `http(s)://` URL or a local file path
    pub dataset: String,
    pub timeout_seconds: u64,
}

/// Event listing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingConfig {
    pub page_size: usize,
    pub max_price: f64,
}

/// Stored session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File backing the "remember me" session tier
    pub file_path: String,
}

/// Admin route guard configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AccessConfig {
    pub protected_prefix: String,
    pub forbidden_path: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when unset
    pub directory: Option<String>,
    pub file_name: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("CUPONME")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::CuponmeError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            geo: GeoConfig::default(),
            listing: ListingConfig::default(),
            session: SessionConfig::default(),
            access: AccessConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_seconds: 10,
            user_agent: "Cuponme/1.0".to_string(),
        }
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            dataset: "data/Comunas_de_Chile.geojson".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: crate::services::pagination::PAGE_SIZE,
            max_price: crate::services::filter::DEFAULT_PRICE_CEILING,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file_path: ".cuponme/session.json".to_string(),
        }
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            protected_prefix: "/Panel".to_string(),
            forbidden_path: "/403".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_name: "cuponme.log".to_string(),
        }
    }
}
