//! Configuration for the compliance assistant.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional file, then `COMPLIANCE__SECTION__KEY` environment variables.

use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "COMPLIANCE";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote compliance API settings
    pub api: ApiConfig,
    /// Result cache settings
    pub cache: CacheConfig,
    /// Telemetry settings
    pub telemetry: TelemetryConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// HTTP service settings
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from environment variables only.
    pub fn from_env() -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(environment())
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Load configuration from a file, with environment variables taking precedence.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .add_source(environment())
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.api.timeout_ms == 0 {
            return Err(Error::config_key(
                "timeout must be greater than zero",
                "api.timeout_ms",
            ));
        }

        if let Some(url) = &self.api.base_url {
            reqwest::Url::parse(url).map_err(|e| {
                Error::config_key(format!("invalid base URL '{}': {}", url, e), "api.base_url")
            })?;
        }

        if self.cache.enabled && self.cache.max_entries == 0 {
            return Err(Error::config_key(
                "cache capacity must be greater than zero",
                "cache.max_entries",
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_key(
                format!("unknown log level '{}'", self.logging.level),
                "logging.level",
            ));
        }

        Ok(())
    }
}

fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Remote compliance API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the compliance API; `ask` is unavailable without it
    pub base_url: Option<String>,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// User agent sent with every request
    pub user_agent: String,
}

impl ApiConfig {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: 30_000,
            user_agent: format!("Compliance-Assistant/{}", crate::VERSION),
        }
    }
}

/// Result cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether answers are cached per question
    pub enabled: bool,
    /// Maximum cached questions
    pub max_entries: usize,
    /// Entry lifetime in seconds
    pub ttl_secs: u64,
}

impl CacheConfig {
    /// Entry lifetime as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 1000,
            ttl_secs: 300,
        }
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Whether counters are collected
    pub enabled: bool,
    /// Service name reported in logs and metrics
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            service_name: "compliance-assistant".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// HTTP service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}
