//! Application Configuration
//!
//! Loaded from the embedded `config/app.toml`; every field has a default.

use std::time::Duration;

use log::LevelFilter;
use serde::Deserialize;

use crate::error::Result;

const EMBEDDED_CONFIG: &str = include_str!("../config/app.toml");

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub listing: ListingConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the remote API, without trailing slash
    pub base_url: String,
    pub timeout_ms: u64,
    /// Extra attempts for idempotent GETs
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://lost-and-found-epjk.onrender.com/api".to_string(),
            timeout_ms: 10_000,
            max_retries: 2,
            retry_backoff_ms: 300,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Fill the listing from previously submitted items in localStorage
    /// when the server listing fails
    pub legacy_local_cache_fallback: bool,
    /// Filter the in-memory listing by the query when a server search fails
    pub search_fallback_to_local: bool,
    pub placeholder_image: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            legacy_local_cache_fallback: false,
            search_fallback_to_local: true,
            placeholder_image: "assets/default.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub token_key: String,
    pub login_page: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: "accessToken".to_string(),
            login_page: "login.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Unknown level names fall back to `info`
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(text)?;
        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Embedded configuration, with the API base overridable at build time
    /// through `LOST_FOUND_API_BASE`.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_toml(EMBEDDED_CONFIG)?;
        if let Some(base) = option_env!("LOST_FOUND_API_BASE") {
            config.api.base_url = base.trim_end_matches('/').to_string();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = AppConfig::from_toml(EMBEDDED_CONFIG).expect("embedded config");
        assert_eq!(config.session.token_key, "accessToken");
        assert!(config.listing.legacy_local_cache_fallback);
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::from_toml("[api]\nbase_url = \"http://localhost:5000/api/\"\n")
            .expect("partial config");
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.max_retries, 2);
        assert!(!config.listing.legacy_local_cache_fallback);
        assert_eq!(config.session.login_page, "login.html");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(AppConfig::from_toml("[api]\ntimeout_ms = \"soon\"\n").is_err());
    }

    #[test]
    fn test_level_filter_fallback() {
        let logging = LoggingConfig { level: "debug".to_string() };
        assert_eq!(logging.level_filter(), LevelFilter::Debug);
        let logging = LoggingConfig { level: "chatty".to_string() };
        assert_eq!(logging.level_filter(), LevelFilter::Info);
    }
}
