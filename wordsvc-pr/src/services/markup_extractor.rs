//! Pronunciation extraction from raw wikitext
//!
//! Matches two template shapes used by English Wiktionary entries:
//!
//! ```text
//! {{IPA|en|/pəˈteɪtəʊz/|a=RP}}
//! {{IPA|en|/tɹiː/|[t̠ʰɹʷiː]|[t͡ʃʰɹʷiː]|}}
//! {{audio|en|en-us-setting.ogg|a=US}}
//! {{audio|en|LL-Q1860 (eng)-Vealhurl-content (verb).wav|a=Southern England}}
//! ```
//!
//! Only the first occurrence of each template counts. Within an IPA template
//! only the first `/.../` segment is taken; bracketed phonetic variants and
//! trailing `key=value` metadata are ignored. A missing template is not an
//! error, the corresponding field is simply `None`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::AudioFilename;

static IPA_TEMPLATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{IPA\|en\|(/[^/]+/)").expect("valid IPA template pattern"));

static AUDIO_TEMPLATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{audio\|en\|([^|}]+)").expect("valid audio template pattern"));

/// Fields found in one section's markup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPronunciation {
    pub ipa: Option<String>,
    pub audio_filename: Option<AudioFilename>,
}

/// Extract IPA and audio filename from section markup
pub fn extract_pronunciation(markup: &str) -> ExtractedPronunciation {
    ExtractedPronunciation {
        ipa: extract_ipa(markup),
        audio_filename: extract_audio_filename(markup),
    }
}

/// First `/.../` transcription of the first English IPA template
pub fn extract_ipa(markup: &str) -> Option<String> {
    IPA_TEMPLATE
        .captures(markup)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Filename of the first English audio template (up to the next `|` or `}`)
pub fn extract_audio_filename(markup: &str) -> Option<AudioFilename> {
    AUDIO_TEMPLATE
        .captures(markup)
        .and_then(|caps| caps.get(1))
        .map(|m| AudioFilename::new(m.as_str()))
}
