//! HTTP API handlers for wordsvc-pr

pub mod health;
pub mod words;

pub use health::health_routes;
pub use words::word_routes;
