//! Service configuration.

use std::time::Duration;

use thiserror::Error;

use crate::cache::DEFAULT_FRESHNESS_WINDOW;

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.kraken.com/0/public";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_UPSTREAM_URL: &str = "LTP_UPSTREAM_URL";
pub const ENV_TIMEOUT_MS: &str = "LTP_TIMEOUT_MS";
pub const ENV_FRESHNESS_SECS: &str = "LTP_FRESHNESS_SECS";

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be an unsigned integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("upstream base url must not be empty")]
    EmptyBaseUrl,

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("freshness window must be greater than zero")]
    ZeroFreshnessWindow,
}

/// Settings for [`QuoteService::from_config`](crate::QuoteService::from_config).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteServiceConfig {
    /// Provider public API root, without the endpoint path.
    pub base_url: String,
    /// Upper bound on one upstream batch call.
    pub request_timeout: Duration,
    /// Maximum age at which a cached quote is still served.
    pub freshness_window: Duration,
    pub user_agent: String,
}

impl Default for QuoteServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            freshness_window: DEFAULT_FRESHNESS_WINDOW,
            user_agent: concat!("ltp/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl QuoteServiceConfig {
    /// Defaults overlaid with `LTP_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`; unset or blank keys keep the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = read(ENV_UPSTREAM_URL) {
            config.base_url = url.trim().to_owned();
        }
        if let Some(raw) = read(ENV_TIMEOUT_MS) {
            config.request_timeout = Duration::from_millis(parse_u64(ENV_TIMEOUT_MS, &raw)?);
        }
        if let Some(raw) = read(ENV_FRESHNESS_SECS) {
            config.freshness_window = Duration::from_secs(parse_u64(ENV_FRESHNESS_SECS, &raw)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.freshness_window.is_zero() {
            return Err(ConfigError::ZeroFreshnessWindow);
        }
        Ok(())
    }
}

fn parse_u64(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: raw.to_owned(),
        })
}
