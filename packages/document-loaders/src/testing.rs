//! Testing utilities including mock implementations.
//!
//! These are useful for testing code built on the loaders without making
//! real network calls. Both mocks record every call for later assertions.

use async_trait::async_trait;
use firecrawl_client::{CrawlStatus, FirecrawlError, ScrapeData};
use openai_client::{ImageGenerationRequest, ImagesResponse, OpenAIError};
use serde_json::Value;
use std::sync::{Arc, RwLock};

use crate::firecrawl::options::Params;
use crate::traits::{FirecrawlApi, ImageApi};

/// Record of a call made to [`MockFirecrawl`].
#[derive(Debug, Clone, PartialEq)]
pub enum FirecrawlCall {
    Scrape { url: String, options: Params },
    Crawl { url: String, options: Params },
    Map { url: String, options: Params },
    Extract { urls: Vec<String>, options: Params },
    Search { query: String, options: Params },
}

/// A mock Firecrawl service with canned responses.
///
/// # Example
///
/// ```rust
/// use document_loaders::testing::MockFirecrawl;
/// use firecrawl_client::ScrapeData;
///
/// let mock = MockFirecrawl::new()
///     .with_page(ScrapeData::markdown("# Hello"))
///     .with_links(vec!["https://example.com/a".into()]);
/// ```
#[derive(Default, Clone)]
pub struct MockFirecrawl {
    /// Returned by scrape (first page), crawl and search
    pages: Arc<RwLock<Vec<ScrapeData>>>,
    links: Arc<RwLock<Vec<String>>>,
    extract_result: Arc<RwLock<Value>>,
    /// When set, every call fails with this API status and message
    failure: Arc<RwLock<Option<(u16, String)>>>,
    calls: Arc<RwLock<Vec<FirecrawlCall>>>,
}

impl MockFirecrawl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page returned by scrape, crawl and search.
    pub fn with_page(self, page: ScrapeData) -> Self {
        self.pages.write().unwrap().push(page);
        self
    }

    /// Add several pages.
    pub fn with_pages(self, pages: Vec<ScrapeData>) -> Self {
        self.pages.write().unwrap().extend(pages);
        self
    }

    /// Set the links returned by map.
    pub fn with_links(self, links: Vec<String>) -> Self {
        *self.links.write().unwrap() = links;
        self
    }

    /// Set the payload returned by extract.
    pub fn with_extract_result(self, result: Value) -> Self {
        *self.extract_result.write().unwrap() = result;
        self
    }

    /// Make every call fail with an API error.
    pub fn failing(self, status: u16, message: impl Into<String>) -> Self {
        *self.failure.write().unwrap() = Some((status, message.into()));
        self
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<FirecrawlCall> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    fn record(&self, call: FirecrawlCall) -> Result<(), FirecrawlError> {
        self.calls.write().unwrap().push(call);

        match self.failure.read().unwrap().as_ref() {
            Some((status, message)) => Err(FirecrawlError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn pages(&self) -> Vec<ScrapeData> {
        self.pages.read().unwrap().clone()
    }
}

#[async_trait]
impl FirecrawlApi for MockFirecrawl {
    async fn scrape(&self, url: &str, options: &Params) -> Result<ScrapeData, FirecrawlError> {
        self.record(FirecrawlCall::Scrape {
            url: url.to_string(),
            options: options.clone(),
        })?;

        Ok(self.pages().into_iter().next().unwrap_or_default())
    }

    async fn crawl(&self, url: &str, options: &Params) -> Result<CrawlStatus, FirecrawlError> {
        self.record(FirecrawlCall::Crawl {
            url: url.to_string(),
            options: options.clone(),
        })?;

        let data = self.pages();
        Ok(CrawlStatus {
            status: "completed".to_string(),
            total: Some(data.len() as u32),
            completed: Some(data.len() as u32),
            data,
            ..Default::default()
        })
    }

    async fn map(&self, url: &str, options: &Params) -> Result<Vec<String>, FirecrawlError> {
        self.record(FirecrawlCall::Map {
            url: url.to_string(),
            options: options.clone(),
        })?;

        Ok(self.links.read().unwrap().clone())
    }

    async fn extract(&self, urls: &[String], options: &Params) -> Result<Value, FirecrawlError> {
        self.record(FirecrawlCall::Extract {
            urls: urls.to_vec(),
            options: options.clone(),
        })?;

        Ok(self.extract_result.read().unwrap().clone())
    }

    async fn search(&self, query: &str, options: &Params) -> Result<Vec<ScrapeData>, FirecrawlError> {
        self.record(FirecrawlCall::Search {
            query: query.to_string(),
            options: options.clone(),
        })?;

        Ok(self.pages())
    }
}

/// A mock image service.
///
/// By default it answers like the real service: `n` URLs of the form
/// `https://example.com/image_{i}.png` when more than one image is asked
/// for, otherwise a single `https://example.com/image.png`.
#[derive(Default, Clone)]
pub struct MockImageApi {
    response: Arc<RwLock<Option<ImagesResponse>>>,
    failure: Arc<RwLock<Option<(u16, String)>>>,
    requests: Arc<RwLock<Vec<ImageGenerationRequest>>>,
}

impl MockImageApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always return this response.
    pub fn with_response(self, response: ImagesResponse) -> Self {
        *self.response.write().unwrap() = Some(response);
        self
    }

    /// Make every call fail with an API error.
    pub fn failing(self, status: u16, message: impl Into<String>) -> Self {
        *self.failure.write().unwrap() = Some((status, message.into()));
        self
    }

    /// All requests received, oldest first.
    pub fn requests(&self) -> Vec<ImageGenerationRequest> {
        self.requests.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }

    fn default_response(n: u32) -> ImagesResponse {
        if n > 1 {
            ImagesResponse::from_urls((0..n).map(|i| format!("https://example.com/image_{i}.png")))
        } else {
            ImagesResponse::from_urls(["https://example.com/image.png"])
        }
    }
}

#[async_trait]
impl ImageApi for MockImageApi {
    async fn generate(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<ImagesResponse, OpenAIError> {
        self.requests.write().unwrap().push(request.clone());

        if let Some((status, message)) = self.failure.read().unwrap().as_ref() {
            return Err(OpenAIError::Api {
                status: *status,
                message: message.clone(),
            });
        }

        Ok(self
            .response
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Self::default_response(request.n.unwrap_or(1))))
    }
}
