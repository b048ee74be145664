//! Word pronunciation endpoint
//!
//! `GET /words/{word}` → `200 { "ipa"?, "audio_url"? }` or `{ "message" }` on failure.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::models::{PronunciationResult, WordQuery};
use crate::AppState;

/// GET /words/:word
pub async fn get_word_pronunciation(
    State(state): State<AppState>,
    word: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<PronunciationResult>> {
    // e.g. percent-decodes to invalid UTF-8
    let Path(word) = word.map_err(|rejection| ApiError::InvalidWord(rejection.body_text()))?;
    let word = WordQuery::parse(Some(word.as_str())).ok_or(ApiError::MissingWord)?;

    debug!(word = %word, "Pronunciation lookup requested");

    state
        .resolver
        .resolve(&word)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_lookup(&word, e))
}

/// GET /words and /words/ (no word given); makes no upstream call
pub async fn missing_word() -> ApiResult<Json<PronunciationResult>> {
    Err(ApiError::MissingWord)
}

/// Build word routes
pub fn word_routes() -> Router<AppState> {
    Router::new()
        .route("/words", get(missing_word))
        .route("/words/", get(missing_word))
        .route("/words/:word", get(get_word_pronunciation))
}
