//! Configuration for the coin bot

use crate::error::{BotError, Result};
use coin_utils::{env_duration_secs, env_parse, env_var};
use std::time::Duration;

/// Default CoinGecko API root
pub const DEFAULT_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// Configuration for price lookups and routing
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Base URL of the price provider API
    pub api_base: String,

    /// Timeout applied to every outbound request
    pub request_timeout: Duration,

    /// How long a fetched quote is reused; zero disables the cache
    pub quote_cache_ttl: Duration,

    /// Maximum number of rows returned by `/search`
    pub search_limit: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(10),
            quote_cache_ttl: Duration::from_secs(30),
            search_limit: 10,
        }
    }
}

impl BotConfig {
    /// Create a new configuration builder
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder::default()
    }

    /// Build a configuration from `COINGECKO_API_BASE`,
    /// `COIN_BOT_REQUEST_TIMEOUT_SECS`, `COIN_BOT_QUOTE_TTL_SECS` and
    /// `COIN_BOT_SEARCH_LIMIT`, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();

        if let Some(base) = env_var("COINGECKO_API_BASE") {
            builder = builder.api_base(base);
        }
        if let Some(timeout) = env_duration_secs("COIN_BOT_REQUEST_TIMEOUT_SECS")? {
            builder = builder.request_timeout(timeout);
        }
        if let Some(ttl) = env_duration_secs("COIN_BOT_QUOTE_TTL_SECS")? {
            builder = builder.quote_cache_ttl(ttl);
        }
        if let Some(limit) = env_parse::<usize>("COIN_BOT_SEARCH_LIMIT")? {
            builder = builder.search_limit(limit);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(BotError::ConfigError(format!(
                "api_base must be an http(s) URL, got {}",
                self.api_base
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(BotError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.search_limit == 0 {
            return Err(BotError::ConfigError(
                "search_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for BotConfig
#[derive(Debug, Default)]
pub struct BotConfigBuilder {
    api_base: Option<String>,
    request_timeout: Option<Duration>,
    quote_cache_ttl: Option<Duration>,
    search_limit: Option<usize>,
}

impl BotConfigBuilder {
    /// Set the provider base URL
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set quote cache TTL
    pub fn quote_cache_ttl(mut self, duration: Duration) -> Self {
        self.quote_cache_ttl = Some(duration);
        self
    }

    /// Set search result cap
    pub fn search_limit(mut self, limit: usize) -> Self {
        self.search_limit = Some(limit);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<BotConfig> {
        let defaults = BotConfig::default();

        let config = BotConfig {
            api_base: self
                .api_base
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            quote_cache_ttl: self.quote_cache_ttl.unwrap_or(defaults.quote_cache_ttl),
            search_limit: self.search_limit.unwrap_or(defaults.search_limit),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BotConfig::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.search_limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = BotConfig::builder()
            .api_base("http://127.0.0.1:8080/api/v3/")
            .search_limit(5)
            .quote_cache_ttl(Duration::ZERO)
            .build()
            .unwrap();

        assert_eq!(config.api_base, "http://127.0.0.1:8080/api/v3");
        assert_eq!(config.search_limit, 5);
        assert!(config.quote_cache_ttl.is_zero());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(BotConfig::builder().api_base("ftp://x").build().is_err());
        assert!(
            BotConfig::builder()
                .request_timeout(Duration::ZERO)
                .build()
                .is_err()
        );
        assert!(BotConfig::builder().search_limit(0).build().is_err());
    }
}
