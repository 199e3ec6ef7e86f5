//! Error handling for Cuponme
//!
//! This module defines the main error types used throughout the crate
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for Cuponme
#[derive(Error, Debug)]
pub enum CuponmeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Backend API error: {0}")]
    Api(#[from] ApiError),

    #[error("Form validation failed: {0}")]
    Validation(#[from] FormError),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Geo dataset error: {0}")]
    Geo(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Errors returned by calls to the external backend.
///
/// Every variant carries a message that can be shown inline next to the
/// form or panel that triggered the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Backend unreachable: {0}")]
    Network(String),

    #[error("Backend request timed out")]
    Timeout,

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Client-side form validation failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("The email addresses do not match")]
    EmailMismatch,

    #[error("The password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("The password must contain an uppercase letter")]
    PasswordMissingUppercase,

    #[error("The password must contain a special character")]
    PasswordMissingSpecial,

    #[error("The passwords do not match")]
    PasswordMismatch,

    #[error("The full name must be at least 3 characters long")]
    FullNameTooShort,

    #[error("The username must be at least 3 characters long")]
    UserNameTooShort,

    #[error("The RUT is incomplete")]
    RutIncomplete,

    #[error("The RUT check digit is invalid")]
    RutInvalid,

    #[error("You must be at least 18 years old to register")]
    Underage,

    #[error("Enter a valid birth date")]
    InvalidBirthDate,

    #[error("Enter a phone number with 9 to 12 digits")]
    InvalidPhone,

    #[error("You must accept the terms to continue")]
    ConsentRequired,
}

/// Result type alias for Cuponme operations
pub type Result<T> = std::result::Result<T, CuponmeError>;

/// Result type alias for backend API operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Build an error from a failed response, preferring the backend's own
    /// `message`, then its `title`, then `"<fallback> (<status>)"`.
    pub fn from_backend(status: u16, message: Option<String>, title: Option<String>, fallback: &str) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .or(title.filter(|t| !t.is_empty()))
            .unwrap_or_else(|| format!("{} ({})", fallback, status));

        ApiError::Backend { status, message }
    }

    /// HTTP status of the failed response, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for an inline error next to the triggering form
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Backend { message, .. } => message.clone(),
            ApiError::Network(_) => "Could not reach the server. Try again.".to_string(),
            ApiError::Timeout => "The server took too long to answer. Try again.".to_string(),
            ApiError::InvalidResponse(_) => "The server sent an unexpected response.".to_string(),
            ApiError::InvalidRequest(reason) => reason.clone(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::InvalidResponse(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl CuponmeError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            CuponmeError::Config(_) => false,
            CuponmeError::ConfigSource(_) => false,
            CuponmeError::Api(_) => true,
            CuponmeError::Validation(_) => true,
            CuponmeError::PermissionDenied(_) => false,
            CuponmeError::Geo(_) => true,
            CuponmeError::Http(_) => true,
            CuponmeError::Serialization(_) => false,
            CuponmeError::Io(_) => true,
            CuponmeError::UrlParse(_) => false,
            CuponmeError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CuponmeError::Config(_) => ErrorSeverity::Critical,
            CuponmeError::ConfigSource(_) => ErrorSeverity::Critical,
            CuponmeError::PermissionDenied(_) => ErrorSeverity::Warning,
            CuponmeError::Validation(_) => ErrorSeverity::Info,
            CuponmeError::InvalidInput(_) => ErrorSeverity::Info,
            CuponmeError::Geo(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
