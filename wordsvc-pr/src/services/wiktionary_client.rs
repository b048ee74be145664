//! Wiktionary (MediaWiki Action API) client
//!
//! Three read-only queries back the pronunciation pipeline:
//! - `action=parse&prop=sections`: section outline of a page
//! - `action=query&prop=revisions`: raw wikitext of one section (main slot, latest revision)
//! - `action=query&prop=imageinfo`: direct URL of a file-namespace page
//!
//! A non-success status from any query is returned as
//! [`WiktionaryError::Upstream`] with the status and body text untouched.
//! No retries.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

use crate::models::{AudioFilename, SectionIndex, WordQuery};

/// Title of the section holding IPA and audio templates
pub const PRONUNCIATION_SECTION_TITLE: &str = "Pronunciation";

/// Wiktionary client errors
#[derive(Debug, Error)]
pub enum WiktionaryError {
    /// Upstream answered with a non-success status
    #[error("API error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    /// Response parsed but lacks an expected substructure
    #[error("Missing data in response: {0}")]
    MissingData(String),
}

/// `action=parse&prop=sections` response
#[derive(Debug, Deserialize)]
struct SectionsResponse {
    parse: ParsedSections,
}

#[derive(Debug, Deserialize)]
struct ParsedSections {
    sections: Vec<Section>,
}

/// One entry of a page's section outline
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    /// Section title as displayed
    pub line: String,
    /// Opaque section index
    pub index: String,
}

/// `action=query` response; pages are keyed by page id
#[derive(Debug, Deserialize)]
struct QueryResponse<P> {
    query: PagesQuery<P>,
}

#[derive(Debug, Deserialize)]
struct PagesQuery<P> {
    pages: BTreeMap<String, P>,
}

#[derive(Debug, Deserialize)]
struct RevisionPage {
    revisions: Option<Vec<Revision>>,
}

#[derive(Debug, Deserialize)]
struct Revision {
    slots: RevisionSlots,
}

#[derive(Debug, Deserialize)]
struct RevisionSlots {
    main: MainSlot,
}

#[derive(Debug, Deserialize)]
struct MainSlot {
    #[serde(rename = "*")]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ImageInfoPage {
    imageinfo: Option<Vec<ImageInfo>>,
}

#[derive(Debug, Deserialize)]
struct ImageInfo {
    url: String,
}

/// Index of the first section titled exactly "Pronunciation"
pub fn find_pronunciation_index(sections: &[Section]) -> Option<SectionIndex> {
    sections
        .iter()
        .find(|section| section.line == PRONUNCIATION_SECTION_TITLE)
        .map(|section| SectionIndex::new(section.index.clone()))
}

/// First page entry of a query response
fn first_page<P>(pages: BTreeMap<String, P>) -> Option<P> {
    pages.into_values().next()
}

/// MediaWiki API client for Wiktionary
pub struct WiktionaryClient {
    http_client: reqwest::Client,
    api_url: String,
}

impl WiktionaryClient {
    /// Create a client for the given `api.php` endpoint
    pub fn new(
        api_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, WiktionaryError> {
        let http_client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| WiktionaryError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            api_url: api_url.into(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Locate the "Pronunciation" section of a word's page
    ///
    /// `Ok(None)` when the page has no such section.
    pub async fn find_pronunciation_section(
        &self,
        word: &WordQuery,
    ) -> Result<Option<SectionIndex>, WiktionaryError> {
        let params = [
            ("action", "parse"),
            ("page", word.as_str()),
            ("prop", "sections"),
            ("format", "json"),
        ];

        let response: SectionsResponse = self.get_json(&params).await?;
        let index = find_pronunciation_index(&response.parse.sections);

        tracing::debug!(
            word = %word,
            sections = response.parse.sections.len(),
            index = ?index.as_ref().map(SectionIndex::as_str),
            "Located pronunciation section"
        );

        Ok(index)
    }

    /// Fetch raw wikitext of one section (main slot of the latest revision)
    pub async fn fetch_section_markup(
        &self,
        word: &WordQuery,
        section: &SectionIndex,
    ) -> Result<String, WiktionaryError> {
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("titles", word.as_str()),
            ("prop", "revisions"),
            ("rvprop", "content"),
            ("rvslots", "*"),
            ("rvsection", section.as_str()),
        ];

        let response: QueryResponse<RevisionPage> = self.get_json(&params).await?;

        let page = first_page(response.query.pages)
            .ok_or_else(|| WiktionaryError::MissingData("query.pages is empty".to_string()))?;

        let revision = page
            .revisions
            .and_then(|revisions| revisions.into_iter().next())
            .ok_or_else(|| {
                WiktionaryError::MissingData(format!("no revisions for page '{}'", word))
            })?;

        Ok(revision.slots.main.content)
    }

    /// Resolve a media filename to its direct URL
    pub async fn resolve_file_url(
        &self,
        filename: &AudioFilename,
    ) -> Result<String, WiktionaryError> {
        let title = filename.file_title();
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("titles", title.as_str()),
            ("prop", "imageinfo"),
            ("iiprop", "url"),
        ];

        let response: QueryResponse<ImageInfoPage> = self.get_json(&params).await?;

        let page = first_page(response.query.pages)
            .ok_or_else(|| WiktionaryError::MissingData("query.pages is empty".to_string()))?;

        let url = page
            .imageinfo
            .and_then(|infos| infos.into_iter().next())
            .map(|info| info.url)
            .ok_or_else(|| WiktionaryError::MissingData(format!("no imageinfo for '{}'", title)))?;

        tracing::debug!(file = %title, url = %url, "Resolved audio file URL");

        Ok(url)
    }

    /// GET the API with query parameters and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, WiktionaryError> {
        tracing::debug!(url = %self.api_url, ?params, "Querying Wiktionary API");

        let response = self
            .http_client
            .get(&self.api_url)
            .query(params)
            .send()
            .await
            .map_err(|e| WiktionaryError::NetworkError(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            // An unreadable error body cannot be passed through verbatim
            let body = response
                .text()
                .await
                .map_err(|e| WiktionaryError::NetworkError(e.to_string()))?;
            return Err(WiktionaryError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| WiktionaryError::ParseError(e.to_string()))
    }
}
