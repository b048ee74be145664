//! Configuration loading and resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument / environment variable (merged by the binary's CLI parser)
//! 2. TOML bootstrap file
//! 3. Compiled defaults
//!
//! A missing TOML file is not an error: the service starts on defaults.
//! An unreadable or unparsable file is.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Default HTTP listen port for the pronunciation resolver
pub const DEFAULT_PORT: u16 = 5780;

/// Default listen address (loopback only)
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

/// English Wiktionary MediaWiki API endpoint
pub const DEFAULT_WIKTIONARY_API_URL: &str = "https://en.wiktionary.org/w/api.php";

/// User-Agent sent upstream (Wikimedia requires a descriptive one)
pub const DEFAULT_USER_AGENT: &str = concat!(
    "WordSvc/",
    env!("CARGO_PKG_VERSION"),
    " (pronunciation resolver)"
);

/// Upstream request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Bootstrap configuration loaded from TOML file
///
/// Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Address to bind the HTTP server to
    #[serde(default)]
    pub bind_address: Option<String>,

    /// MediaWiki API endpoint (`.../w/api.php`)
    #[serde(default)]
    pub wiktionary_api_url: Option<String>,

    /// User-Agent header for upstream requests
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Upstream request timeout in seconds
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Origins allowed by CORS; empty disables the CORS layer
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default)]
    pub level: Option<String>,
}

impl TomlConfig {
    /// Load and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, falling back to defaults when none exists
    ///
    /// An explicitly requested path must exist. Without one, the platform
    /// config location is tried (see [`default_config_path`]).
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            info!("Loading config from {}", path.display());
            return Self::load(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                info!("Loading config from {}", path.display());
                Self::load(&path)
            }
            Some(path) => {
                info!(
                    "No config file at {}, using built-in defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            None => {
                warn!("Could not determine config directory, using built-in defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Platform config file location: `<config_dir>/wordsvc/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wordsvc").join("config.toml"))
}

/// Values supplied on the command line or through environment variables
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub bind_address: Option<String>,
    pub wiktionary_api_url: Option<String>,
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub bind_address: String,
    pub port: u16,
    pub wiktionary_api_url: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
    pub log_level: String,
}

impl ServiceConfig {
    /// Merge overrides, TOML values and defaults, then validate
    pub fn resolve(overrides: &ConfigOverrides, toml: &TomlConfig) -> Result<Self> {
        let config = Self {
            bind_address: overrides
                .bind_address
                .clone()
                .or_else(|| toml.bind_address.clone())
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port: overrides.port.or(toml.port).unwrap_or(DEFAULT_PORT),
            wiktionary_api_url: overrides
                .wiktionary_api_url
                .clone()
                .or_else(|| toml.wiktionary_api_url.clone())
                .unwrap_or_else(|| DEFAULT_WIKTIONARY_API_URL.to_string()),
            user_agent: toml
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            request_timeout: Duration::from_secs(
                toml.request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            cors_allowed_origins: toml.cors_allowed_origins.clone(),
            log_level: overrides
                .log_level
                .clone()
                .or_else(|| toml.logging.level.clone())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
                .to_lowercase(),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.wiktionary_api_url.starts_with("http://")
            || self.wiktionary_api_url.starts_with("https://"))
        {
            return Err(Error::Config(format!(
                "wiktionary_api_url must be an http(s) URL, got '{}'",
                self.wiktionary_api_url
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(Error::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(Error::Config("user_agent must not be empty".to_string()));
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(Error::Config(format!(
                "Invalid log level '{}' (expected one of: {})",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// `host:port` string for the listener
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            wiktionary_api_url: DEFAULT_WIKTIONARY_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            cors_allowed_origins: Vec::new(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
