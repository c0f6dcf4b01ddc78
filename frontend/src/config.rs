//! Application configuration.
//!
//! The service origin is baked in at build time from `VAULTAGE_BACKEND_URL`
//! (e.g. `VAULTAGE_BACKEND_URL=https://vault.example.org trunk build`).

use vaultage::{ClientConfig, DEFAULT_BACKEND_URL};

/// Processing service origin.
pub const BACKEND_URL: &str = match option_env!("VAULTAGE_BACKEND_URL") {
    Some(url) => url,
    None => DEFAULT_BACKEND_URL,
};

/// Application name, shown in the header and the page title.
pub const APP_NAME: &str = "QuasarVaultage";

/// `accept` filter of the file picker.
pub const ACCEPTED_FILES: &str = ".xls,.xlsx,application/vnd.ms-excel,application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Client configuration for [`BACKEND_URL`].
///
/// A malformed build-time origin is logged and replaced by the default.
pub fn client_config() -> ClientConfig {
    ClientConfig::new(BACKEND_URL).unwrap_or_else(|e| {
        log::error!("❌ {}, falling back to {}", e, DEFAULT_BACKEND_URL);
        ClientConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_is_valid() {
        let config = client_config();
        assert!(config.base_url().starts_with("http"));
        assert!(!config.base_url().ends_with('/'));
    }
}
