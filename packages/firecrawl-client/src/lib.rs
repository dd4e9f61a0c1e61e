//! Pure Firecrawl REST API client.
//!
//! A minimal client for the Firecrawl v1 API with no document-loading logic.
//! Supports scrape, crawl, map, extract and search. Crawl and extract are
//! asynchronous jobs on the Firecrawl side; this client starts the job and
//! polls until it reaches a terminal state.
//!
//! Request options are passed through as a free-form JSON map and merged into
//! the request body, so callers can use any option the API accepts.
//!
//! # Example
//!
//! ```rust,ignore
//! use firecrawl_client::{FirecrawlClient, Options};
//!
//! let client = FirecrawlClient::from_env()?;
//!
//! let mut options = Options::new();
//! options.insert("formats".into(), serde_json::json!(["markdown"]));
//!
//! let page = client.scrape("https://firecrawl.dev", &options).await?;
//! println!("{}", page.markdown.unwrap_or_default());
//! ```

pub mod error;
pub mod types;

pub use error::{FirecrawlError, Result};
pub use types::{CrawlStatus, Options, ScrapeData};

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use types::{JobStartResponse, MapResponse, ScrapeResponse, SearchResponse};

/// Default API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.firecrawl.dev";

/// Pure Firecrawl API client.
#[derive(Clone)]
pub struct FirecrawlClient {
    http_client: Client,
    api_key: String,
    api_url: String,
    poll_interval: Duration,
    poll_timeout: Duration,
}

impl FirecrawlClient {
    /// Create a new Firecrawl client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            poll_interval: Duration::from_secs(2),
            poll_timeout: Duration::from_secs(300),
        }
    }

    /// Create from environment variables `FIRECRAWL_API_KEY` and,
    /// optionally, `FIRECRAWL_API_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("FIRECRAWL_API_KEY")
            .map_err(|_| FirecrawlError::Config("FIRECRAWL_API_KEY not set".into()))?;
        let client = Self::new(api_key);
        Ok(match std::env::var("FIRECRAWL_API_URL") {
            Ok(url) if !url.is_empty() => client.with_api_url(url),
            _ => client,
        })
    }

    /// Set a custom API URL (self-hosted instances, proxies).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the interval between job status polls.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set how long to wait for an async job before giving up.
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Get the API URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Scrape a single URL.
    pub async fn scrape(&self, url: &str, options: &Options) -> Result<ScrapeData> {
        let body = with_field(options, "url", Value::from(url));
        let response: ScrapeResponse = self.post("/v1/scrape", &body).await?;

        if !response.success {
            return Err(unsuccessful(response.error, "scrape failed"));
        }

        response
            .data
            .ok_or_else(|| FirecrawlError::Parse("No data returned from Firecrawl".into()))
    }

    /// Crawl a site: start the job and wait for it to complete.
    pub async fn crawl(&self, url: &str, options: &Options) -> Result<CrawlStatus> {
        let body = with_field(options, "url", Value::from(url));
        let id = self.start_job("/v1/crawl", &body).await?;

        info!(url, crawl_id = %id, "Crawl started, polling for results");

        let status: CrawlStatus = self.wait_for_job("/v1/crawl", &id).await?;

        info!(
            url,
            crawl_id = %id,
            pages = status.data.len(),
            "Crawl completed"
        );

        Ok(status)
    }

    /// List the URLs of a site without scraping them.
    pub async fn map(&self, url: &str, options: &Options) -> Result<Vec<String>> {
        let body = with_field(options, "url", Value::from(url));
        let response: MapResponse = self.post("/v1/map", &body).await?;

        if !response.success {
            return Err(unsuccessful(response.error, "map failed"));
        }

        Ok(response.links)
    }

    /// Run structured extraction over one or more URLs.
    ///
    /// Returns the final job payload as reported by the API.
    pub async fn extract(&self, urls: &[String], options: &Options) -> Result<Value> {
        let body = with_field(options, "urls", Value::from(urls.to_vec()));
        let id = self.start_job("/v1/extract", &body).await?;

        info!(urls = ?urls, extract_id = %id, "Extract started, polling for results");

        self.wait_for_job("/v1/extract", &id).await
    }

    /// Search the web and optionally scrape the hits.
    pub async fn search(&self, query: &str, options: &Options) -> Result<Vec<ScrapeData>> {
        let body = with_field(options, "query", Value::from(query));
        let response: SearchResponse = self.post("/v1/search", &body).await?;

        if !response.success {
            return Err(unsuccessful(response.error, "search failed"));
        }

        Ok(response.data)
    }

    async fn start_job(&self, path: &str, body: &Options) -> Result<String> {
        let response: JobStartResponse = self.post(path, body).await?;

        if !response.success {
            return Err(unsuccessful(response.error, "failed to start job"));
        }

        response
            .id
            .ok_or_else(|| FirecrawlError::Parse("No job ID returned".into()))
    }

    async fn wait_for_job<R: DeserializeOwned>(&self, path: &str, id: &str) -> Result<R> {
        let started = Instant::now();

        loop {
            let payload: Value = self.get(&format!("{}/{}", path, id)).await?;
            let status = payload
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            match status.as_str() {
                "completed" => {
                    return serde_json::from_value(payload)
                        .map_err(|e| FirecrawlError::Parse(e.to_string()));
                }
                "failed" | "cancelled" => {
                    return Err(FirecrawlError::JobFailed {
                        id: id.to_string(),
                        status,
                    });
                }
                _ => {
                    debug!(job_id = id, status = %status, "Job still in progress");
                }
            }

            if started.elapsed() >= self.poll_timeout {
                return Err(FirecrawlError::Timeout { id: id.to_string() });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn post<T: Serialize, R: DeserializeOwned>(&self, path: &str, body: &T) -> Result<R> {
        let response = self
            .http_client
            .post(format!("{}{}", self.api_url, path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, path, "Firecrawl request failed");
                FirecrawlError::Network(e.to_string())
            })?;

        Self::parse(path, response).await
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let response = self
            .http_client
            .get(format!("{}{}", self.api_url, path))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, path, "Firecrawl request failed");
                FirecrawlError::Network(e.to_string())
            })?;

        Self::parse(path, response).await
    }

    async fn parse<R: DeserializeOwned>(path: &str, response: Response) -> Result<R> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, path, error = %body, "Firecrawl API error");
            return Err(FirecrawlError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.json().await?)
    }
}

/// Copy `options` and set one body field on the copy.
fn with_field(options: &Options, key: &str, value: Value) -> Options {
    let mut body = options.clone();
    body.insert(key.to_string(), value);
    body
}

/// Map a `success: false` envelope (served with a 2xx status) to an error.
fn unsuccessful(error: Option<String>, fallback: &str) -> FirecrawlError {
    FirecrawlError::Api {
        status: 200,
        message: error.unwrap_or_else(|| fallback.to_string()),
    }
}
