//! Error types for wordsvc-pr
//!
//! The HTTP layer is the only place that shapes failure responses:
//! every failure body is `{ "message": ... }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::WordQuery;
use crate::services::WiktionaryError;

/// Message returned when the word path parameter is absent
pub const MISSING_WORD_MESSAGE: &str = "Word parameter is required";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Word parameter missing or empty (400)
    #[error("Word parameter is required")]
    MissingWord,

    /// Word path segment could not be decoded (400)
    #[error("Invalid word parameter: {0}")]
    InvalidWord(String),

    /// Upstream non-success, status and body passed through verbatim
    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Anything else (500); detail stays in the logs
    #[error("Error fetching data for word {word}")]
    Internal { word: String },
}

impl ApiError {
    /// Map a pipeline failure for `word` to the response it produces
    pub fn from_lookup(word: &WordQuery, err: WiktionaryError) -> Self {
        match err {
            WiktionaryError::Upstream { status, body } => {
                warn!(word = %word, status, "Upstream lookup failed");
                ApiError::Upstream { status, body }
            }
            other => {
                error!(word = %word, error = %other, "Error fetching data for word {}", word);
                ApiError::Internal {
                    word: word.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingWord => (StatusCode::BAD_REQUEST, MISSING_WORD_MESSAGE.to_string()),
            ApiError::InvalidWord(detail) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid word parameter: {}", detail),
            ),
            ApiError::Upstream { status, body } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                body,
            ),
            ApiError::Internal { word } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error fetching data for word {}", word),
            ),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
