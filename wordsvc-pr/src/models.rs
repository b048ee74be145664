//! Domain types for the pronunciation lookup pipeline
//!
//! All values are transient and scoped to a single request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Word to look up (non-empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordQuery(String);

impl WordQuery {
    /// Accept a raw path parameter; `None` when absent or empty
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        raw.filter(|word| !word.is_empty())
            .map(|word| Self(word.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WordQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque section identifier returned by the MediaWiki parse API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionIndex(String);

impl SectionIndex {
    pub fn new(index: impl Into<String>) -> Self {
        Self(index.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Media filename referenced by an audio template (not a URL)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFilename(String);

impl AudioFilename {
    pub fn new(filename: impl Into<String>) -> Self {
        Self(filename.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Page title in the file namespace, e.g. `File:en-us-setting.ogg`
    pub fn file_title(&self) -> String {
        format!("File:{}", self.0)
    }
}

/// Pronunciation data returned to the caller
///
/// Both fields are independently optional; absent fields are omitted from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronunciationResult {
    /// IPA transcription including its slashes, e.g. `/ˈkʊki/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipa: Option<String>,
    /// Direct URL of the spoken-audio file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}
