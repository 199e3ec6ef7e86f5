//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{CuponmeError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_geo_config(&settings.geo)?;
    validate_listing_config(&settings.listing)?;
    validate_session_config(&settings.session)?;
    validate_access_config(&settings.access)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate backend API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(CuponmeError::Config(
            "API base URL is required".to_string()
        ));
    }

    let url = url::Url::parse(&config.base_url)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CuponmeError::Config(
            format!("API base URL must use http or https, got: {}", url.scheme())
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(CuponmeError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate geo dataset configuration
fn validate_geo_config(config: &super::GeoConfig) -> Result<()> {
    if config.dataset.is_empty() {
        return Err(CuponmeError::Config(
            "Geo dataset location is required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(CuponmeError::Config(
            "Geo dataset timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate listing configuration
fn validate_listing_config(config: &super::ListingConfig) -> Result<()> {
    if config.page_size == 0 {
        return Err(CuponmeError::Config(
            "Page size must be greater than 0".to_string()
        ));
    }

    if !(config.max_price.is_finite() && config.max_price > 0.0) {
        return Err(CuponmeError::Config(
            "Max price must be a positive number".to_string()
        ));
    }

    Ok(())
}

/// Validate session configuration
fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    if config.file_path.is_empty() {
        return Err(CuponmeError::Config(
            "Session file path is required".to_string()
        ));
    }

    Ok(())
}

/// Validate route guard configuration
fn validate_access_config(config: &super::AccessConfig) -> Result<()> {
    if !config.protected_prefix.starts_with('/') {
        return Err(CuponmeError::Config(
            "Protected prefix must be an absolute path".to_string()
        ));
    }

    if !config.forbidden_path.starts_with('/') {
        return Err(CuponmeError::Config(
            "Forbidden path must be an absolute path".to_string()
        ));
    }

    if config.forbidden_path.starts_with(&config.protected_prefix) {
        return Err(CuponmeError::Config(
            "Forbidden path cannot live under the protected prefix".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(CuponmeError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(CuponmeError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if config.directory.is_some() && config.file_name.is_empty() {
        return Err(CuponmeError::Config(
            "Log file name is required when a log directory is set".to_string()
        ));
    }

    Ok(())
}
