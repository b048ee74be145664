//! Pronunciation lookup services

pub mod markup_extractor;
pub mod pronunciation_resolver;
pub mod wiktionary_client;

pub use markup_extractor::{extract_pronunciation, ExtractedPronunciation};
pub use pronunciation_resolver::PronunciationResolver;
pub use wiktionary_client::{WiktionaryClient, WiktionaryError};
