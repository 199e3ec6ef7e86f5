//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Cuponme crate.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// When a log directory is configured, a daily rolling file layer is added
/// next to stdout. The returned guard must be kept alive for the file
/// writer to flush.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, &config.file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(file_layer)
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log API errors with context
pub fn log_api_error(endpoint: &str, status: Option<u16>, error: &str) {
    error!(
        endpoint = endpoint,
        status = status,
        error = error,
        "API error occurred"
    );
}

/// Log a denied access-control check
pub fn log_access_denied(gate: &str, user_id: Option<&str>, reason: &str) {
    warn!(
        gate = gate,
        user_id = user_id,
        reason = reason,
        "Access denied"
    );
}

/// Log the outcome of a filter recomputation
pub fn log_filter_applied(total: usize, matched: usize, filters_active: bool) {
    debug!(
        total = total,
        matched = matched,
        filters_active = filters_active,
        "Event filter applied"
    );
}

/// Log the outcome of a geo dataset load
pub fn log_geo_loaded(source: &str, features: usize, communes: usize) {
    info!(
        source = source,
        features = features,
        communes = communes,
        "Geo dataset loaded"
    );
}

/// Log session lifecycle changes
pub fn log_session_change(action: &str, email: Option<&str>, role: Option<&str>) {
    info!(
        action = action,
        email = email,
        role = role,
        "Session changed"
    );
}
