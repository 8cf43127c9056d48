//! Configuration management for the IPMA proxy
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with IPMA_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::retry::RetryConfig;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Upstream IPMA API configuration
    pub upstream: UpstreamConfig,

    /// Response cache configuration
    pub cache: CacheConfig,

    /// Log output configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the IPMA open data API
    pub base_url: String,

    /// User-Agent sent with every upstream request
    pub user_agent: String,

    /// Deadline for a single upstream call, in seconds
    pub timeout_secs: u64,

    /// Answer list endpoints with an empty result when the upstream fails,
    /// instead of a 502
    pub degrade_to_empty: bool,

    /// Retry policy for transient upstream failures
    #[serde(default)]
    pub retry: RetryConfig,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    /// TTL for reference tables (districts, weather types, classes).
    /// Unset means entries live for the whole process.
    pub reference_ttl_secs: Option<u64>,

    /// TTL for time-series feeds (warnings, seismic, marine, stations, zones)
    pub feed_ttl_secs: Option<u64>,

    /// TTL for per-location forecast documents
    pub forecast_ttl_secs: Option<u64>,

    /// Maximum number of cached forecast documents
    pub max_forecast_entries: u64,
}

impl CacheConfig {
    pub fn reference_ttl(&self) -> Option<Duration> {
        self.reference_ttl_secs.map(Duration::from_secs)
    }

    pub fn feed_ttl(&self) -> Option<Duration> {
        self.feed_ttl_secs.map(Duration::from_secs)
    }

    pub fn forecast_ttl(&self) -> Option<Duration> {
        self.forecast_ttl_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Emit JSON formatted log lines
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("IPMA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("upstream.base_url", DEFAULT_BASE_URL)?
            .set_default("upstream.user_agent", DEFAULT_USER_AGENT)?
            .set_default("upstream.timeout_secs", 10)?
            .set_default("upstream.degrade_to_empty", true)?
            .set_default("cache.feed_ttl_secs", 600)?
            .set_default("cache.forecast_ttl_secs", 1800)?
            .set_default("cache.max_forecast_entries", 1024)?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (IPMA_ prefix)
            .add_source(
                Environment::with_prefix("IPMA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

/// Public IPMA open data endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.ipma.pt/open-data";

/// Identifying header sent upstream
pub const DEFAULT_USER_AGENT: &str = "weather_api_ipma/2.0";

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            degrade_to_empty: true,
            retry: RetryConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            reference_ttl_secs: None,
            feed_ttl_secs: Some(600),
            forecast_ttl_secs: Some(1800),
            max_forecast_entries: 1024,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Configuration pointing at a specific upstream, with retries disabled.
    /// Used to run the service against a local stub.
    pub fn for_upstream(base_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.upstream.base_url = base_url.into();
        config.upstream.retry = RetryConfig::disabled();
        config
    }
}
