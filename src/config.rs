//! Configuration and settings management
//!
//! Loads settings from environment variables and defines engine constants.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Bot API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

/// Per-call HTTP timeout toward the Bot API, in seconds.
pub const API_TIMEOUT_SECS: u64 = 30;

/// Engine settings loaded from environment variables
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Base URL of the Bot API (overridable for self-hosted API servers)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-call HTTP timeout in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

const fn default_http_timeout_secs() -> u64 {
    API_TIMEOUT_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            http_timeout_secs: API_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Create new settings by loading from environment and files
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails.
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(File::with_name("config/default").required(false))
            // Add in the current environment file
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked into git
            .add_source(File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of APP)
            .add_source(Environment::with_prefix("APP").separator("__"))
            // Also add settings from environment variables directly (without prefix)
            // ignore_empty treats empty env vars as unset
            .add_source(Environment::default().ignore_empty(true))
            .build()?;

        let mut settings: Self = s.try_deserialize()?;

        // Fallback: check environment variables directly if config didn't pick them up
        if settings.api_base_url == DEFAULT_API_BASE_URL {
            if let Ok(val) = std::env::var("TELEGRAM_API_BASE_URL") {
                if !val.is_empty() {
                    settings.api_base_url = val;
                }
            }
        }

        Ok(settings)
    }

    /// Per-call timeout toward the Bot API as a [`Duration`]
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    // Env manipulation stays inside one test to avoid race conditions
    #[test]
    fn test_settings_loading() -> Result<(), Box<dyn std::error::Error>> {
        // 1. Defaults with nothing set
        env::remove_var("API_BASE_URL");
        env::remove_var("TELEGRAM_API_BASE_URL");
        env::remove_var("HTTP_TIMEOUT_SECS");

        let settings = Settings::new()?;
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.http_timeout_secs, API_TIMEOUT_SECS);
        assert_eq!(settings.http_timeout(), Duration::from_secs(30));

        // 2. Direct env mapping
        env::set_var("API_BASE_URL", "http://localhost:8081");
        let settings = Settings::new()?;
        assert_eq!(settings.api_base_url, "http://localhost:8081");
        env::remove_var("API_BASE_URL");

        // 3. Explicit fallback variable
        env::set_var("TELEGRAM_API_BASE_URL", "http://fallback.test");
        let settings = Settings::new()?;
        assert_eq!(settings.api_base_url, "http://fallback.test");
        env::remove_var("TELEGRAM_API_BASE_URL");

        // 4. Empty env var treated as unset
        env::set_var("TELEGRAM_API_BASE_URL", "");
        let settings = Settings::new()?;
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        env::remove_var("TELEGRAM_API_BASE_URL");

        Ok(())
    }
}
