//! # WordSvc Common Library
//!
//! Shared code for WordSvc microservices:
//! - Error types
//! - Configuration loading (TOML bootstrap file) and resolution

pub mod config;
pub mod error;

pub use error::{Error, Result};
