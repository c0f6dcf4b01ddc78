//! Error types for the Vaultage client.
//!
//! - [`GatewayError`] - failures talking to the processing service
//! - [`ConfigError`] - invalid client configuration
//!
//! List and file fetch failures are logged and swallowed by the controllers;
//! only upload failures ever reach the user, through
//! [`GatewayError::detail`].

use thiserror::Error;

// =============================================================================
// Gateway Errors
// =============================================================================

/// Errors from the HTTP gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport failure (connection refused, CORS, DNS...).
    #[error("HTTP request failed: {0}")]
    Network(String),

    /// The request could not be built (bad body, browser API failure).
    #[error("Failed to build request: {0}")]
    Request(String),

    /// Non-2xx answer from the service.
    #[error("Server error ({status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },

    /// The body did not match the expected JSON shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Local filesystem failure while saving a download.
    #[error("Failed to save download: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    /// Build a [`GatewayError::Server`] from a status code and the raw body.
    pub fn server(status: u16, body: &str) -> Self {
        GatewayError::Server {
            status,
            detail: error_detail(body),
        }
    }

    /// Human-readable detail supplied by the service, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            GatewayError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

/// Extract the `detail` string from an error body.
///
/// Validation errors carry a list under `detail`; only plain strings are
/// meant for display.
pub fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let detail = value.get("detail")?.as_str()?.trim();
    if detail.is_empty() {
        None
    } else {
        Some(detail.to_string())
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Invalid client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Base URL is empty or not an http(s) origin.
    #[error("Invalid backend URL '{0}': expected an http:// or https:// origin")]
    InvalidBaseUrl(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;
