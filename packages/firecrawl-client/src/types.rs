//! Firecrawl v1 request and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form request options, sent as top-level body fields.
pub type Options = Map<String, Value>;

/// A single scraped page as returned by scrape, crawl and search.
///
/// Which fields are present depends on the `formats` requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    #[serde(rename = "rawHtml", default, skip_serializing_if = "Option::is_none")]
    pub raw_html: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,

    /// LLM extraction result when the `extract` format was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract: Option<Value>,

    /// Page metadata (title, sourceURL, statusCode, og tags, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,

    // Search hits carry these at the top level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ScrapeData {
    /// Create a record with only markdown content.
    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            markdown: Some(content.into()),
            ..Default::default()
        }
    }

    /// Set the html content.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Set the raw html content.
    pub fn with_raw_html(mut self, raw_html: impl Into<String>) -> Self {
        self.raw_html = Some(raw_html.into());
        self
    }

    /// Add a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Envelope for `POST /v1/scrape`.
#[derive(Debug, Deserialize)]
pub(crate) struct ScrapeResponse {
    pub success: bool,
    pub data: Option<ScrapeData>,
    pub error: Option<String>,
}

/// Envelope for endpoints that start an async job (`/crawl`, `/extract`).
#[derive(Debug, Deserialize)]
pub(crate) struct JobStartResponse {
    pub success: bool,
    pub id: Option<String>,
    pub error: Option<String>,
}

/// Result of a finished crawl job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrawlStatus {
    pub status: String,

    #[serde(default)]
    pub total: Option<u32>,

    #[serde(default)]
    pub completed: Option<u32>,

    #[serde(rename = "creditsUsed", default)]
    pub credits_used: Option<u32>,

    #[serde(rename = "expiresAt", default)]
    pub expires_at: Option<DateTime<Utc>>,

    /// Cursor for the next page of results. Not followed by this client.
    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub data: Vec<ScrapeData>,
}

/// Envelope for `POST /v1/map`.
#[derive(Debug, Deserialize)]
pub(crate) struct MapResponse {
    pub success: bool,
    #[serde(default)]
    pub links: Vec<String>,
    pub error: Option<String>,
}

/// Envelope for `POST /v1/search`.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<ScrapeData>,
    pub error: Option<String>,
}
