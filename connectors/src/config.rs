use common::{Error, Result};
use std::time::Duration;

use crate::coingecko::COINGECKO_API_URL;

pub const DEFAULT_USER_AGENT: &str = concat!("crypto-conv/", env!("CARGO_PKG_VERSION"));

/// Configuration for the price provider connection
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorConfig {
    /// Provider API root, without trailing slash
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Request timeout. `None` waits until the transfer finishes or fails.
    pub timeout: Option<Duration>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl ConnectorConfig {
    /// Build the configuration from `CRYPTO_CONV_API_URL` and
    /// `CRYPTO_CONV_TIMEOUT_SECS`, falling back to the defaults when unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("CRYPTO_CONV_API_URL") {
            let url = url.trim().trim_end_matches('/');
            if url.is_empty() {
                return Err(Error::ConfigError(
                    "CRYPTO_CONV_API_URL must not be empty".to_string(),
                ));
            }
            config.base_url = url.to_string();
        }

        if let Some(secs) = lookup("CRYPTO_CONV_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                Error::ConfigError(format!(
                    "CRYPTO_CONV_TIMEOUT_SECS must be a positive integer, got \"{}\"",
                    secs
                ))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
