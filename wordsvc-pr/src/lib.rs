//! wordsvc-pr library - Pronunciation Resolver
//!
//! Resolves a word to its IPA transcription and spoken-audio URL using the
//! Wiktionary MediaWiki API. Exposes the router and services for the binary
//! and for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::services::PronunciationResolver;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Lookup pipeline; holds the only shared resource (HTTP connection pool)
    pub resolver: Arc<PronunciationResolver>,
}

impl AppState {
    /// Create new application state
    pub fn new(resolver: PronunciationResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}

/// Build application router
///
/// `cors_allowed_origins` empty means no CORS headers are emitted.
pub fn build_router(state: AppState, cors_allowed_origins: &[String]) -> Router {
    let router = Router::new()
        .merge(api::word_routes())
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors_layer(cors_allowed_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// CORS for browser clients: listed origins only, `GET` only
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET])
            .allow_headers([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                HeaderName::from_static("x-api-key"),
            ]),
    )
}
