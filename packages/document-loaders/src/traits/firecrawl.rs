//! Firecrawl service trait.

use async_trait::async_trait;
use firecrawl_client::{CrawlStatus, FirecrawlClient, FirecrawlError, ScrapeData};
use serde_json::Value;

use crate::firecrawl::options::Params;

type ApiResult<T> = std::result::Result<T, FirecrawlError>;

/// The Firecrawl operations a loader needs.
///
/// Options are passed through to the service as body fields.
#[async_trait]
pub trait FirecrawlApi: Send + Sync {
    /// Scrape a single page.
    async fn scrape(&self, url: &str, options: &Params) -> ApiResult<ScrapeData>;

    /// Crawl a site and return the finished job.
    async fn crawl(&self, url: &str, options: &Params) -> ApiResult<CrawlStatus>;

    /// List the URLs of a site.
    async fn map(&self, url: &str, options: &Params) -> ApiResult<Vec<String>>;

    /// Run structured extraction over some URLs.
    async fn extract(&self, urls: &[String], options: &Params) -> ApiResult<Value>;

    /// Search the web.
    async fn search(&self, query: &str, options: &Params) -> ApiResult<Vec<ScrapeData>>;
}

#[async_trait]
impl FirecrawlApi for FirecrawlClient {
    async fn scrape(&self, url: &str, options: &Params) -> ApiResult<ScrapeData> {
        FirecrawlClient::scrape(self, url, options).await
    }

    async fn crawl(&self, url: &str, options: &Params) -> ApiResult<CrawlStatus> {
        FirecrawlClient::crawl(self, url, options).await
    }

    async fn map(&self, url: &str, options: &Params) -> ApiResult<Vec<String>> {
        FirecrawlClient::map(self, url, options).await
    }

    async fn extract(&self, urls: &[String], options: &Params) -> ApiResult<Value> {
        FirecrawlClient::extract(self, urls, options).await
    }

    async fn search(&self, query: &str, options: &Params) -> ApiResult<Vec<ScrapeData>> {
        FirecrawlClient::search(self, query, options).await
    }
}
