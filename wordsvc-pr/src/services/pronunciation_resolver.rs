//! Pronunciation lookup pipeline
//!
//! `START → section locator → section fetch + extraction → (audio resolver | skip) → DONE`
//!
//! Stages run strictly in sequence since each needs the previous one's
//! output. The first error aborts the pipeline and is returned unchanged,
//! including an audio-resolution failure after IPA was already found.

use tracing::{debug, info};

use crate::models::{PronunciationResult, WordQuery};
use crate::services::markup_extractor::extract_pronunciation;
use crate::services::wiktionary_client::{WiktionaryClient, WiktionaryError};

/// Resolves a word to its IPA transcription and audio URL
pub struct PronunciationResolver {
    client: WiktionaryClient,
}

impl PronunciationResolver {
    pub fn new(client: WiktionaryClient) -> Self {
        Self { client }
    }

    /// Run the three-stage lookup for one word
    pub async fn resolve(&self, word: &WordQuery) -> Result<PronunciationResult, WiktionaryError> {
        let section = self.client.find_pronunciation_section(word).await?;

        let markup = match &section {
            Some(index) => self.client.fetch_section_markup(word, index).await?,
            None => {
                debug!(word = %word, "No Pronunciation section, nothing to extract");
                String::new()
            }
        };

        let extracted = extract_pronunciation(&markup);

        let audio_url = match &extracted.audio_filename {
            Some(filename) => Some(self.client.resolve_file_url(filename).await?),
            None => None,
        };

        info!(
            word = %word,
            ipa = ?extracted.ipa,
            audio = audio_url.is_some(),
            "Resolved pronunciation"
        );

        Ok(PronunciationResult {
            ipa: extracted.ipa,
            audio_url,
        })
    }
}
