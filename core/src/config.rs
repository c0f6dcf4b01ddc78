//! Client configuration.
//!
//! Every gateway call resolves its URL through [`ClientConfig::endpoint`],
//! so the service origin is injected rather than baked into call sites.

use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

/// Origin used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Delay between a successful upload and the batch list refresh.
///
/// The service detects new uploads asynchronously, so the new batch is
/// usually not listable the instant the upload returns. This is a
/// best-effort hint; the manual refresh stays available.
pub const POST_UPLOAD_REFRESH_DELAY: Duration = Duration::from_millis(1000);

/// Configuration shared by the gateways and the refresh coordinator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    refresh_delay: Duration,
}

impl ClientConfig {
    /// Create a configuration for the given service origin.
    ///
    /// Trailing slashes are dropped; anything that is not an http(s) URL is
    /// rejected.
    pub fn new(base_url: impl Into<String>) -> ConfigResult<Self> {
        let raw = base_url.into();
        let trimmed = raw.trim().trim_end_matches('/');

        let has_scheme = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .is_some_and(|host| !host.is_empty());
        if !has_scheme {
            return Err(ConfigError::InvalidBaseUrl(raw));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
            refresh_delay: POST_UPLOAD_REFRESH_DELAY,
        })
    }

    /// Override the post-upload refresh delay.
    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn refresh_delay(&self) -> Duration {
        self.refresh_delay
    }

    /// Absolute URL for a server-relative path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            refresh_delay: POST_UPLOAD_REFRESH_DELAY,
        }
    }
}
