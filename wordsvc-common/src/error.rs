//! Common error types for WordSvc

use thiserror::Error;

/// Common result type for WordSvc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across WordSvc microservices
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML config file could not be parsed
    #[error("Invalid TOML configuration: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
