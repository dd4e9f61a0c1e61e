//! Firecrawl document loader.

use async_trait::async_trait;
use firecrawl_client::FirecrawlClient;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::credentials::{env_setting, resolve_api_key, ApiKey};
use crate::error::{LoaderError, Result};
use crate::firecrawl::options::{normalize_crawl_options, normalize_scrape_options, Params};
use crate::firecrawl::projection::{project, Record};
use crate::traits::{DocumentIter, DocumentLoader, FirecrawlApi};

const API_KEY_VAR: &str = "FIRECRAWL_API_KEY";
const API_URL_VAR: &str = "FIRECRAWL_API_URL";

/// What the loader asks Firecrawl to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// All accessible sub pages of the URL
    #[default]
    Crawl,
    /// The single URL
    Scrape,
    /// URLs of the site, one document per link
    Map,
    /// Structured extraction, one document holding the JSON result
    Extract,
    /// Web search driven by the `query` param
    Search,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Crawl => "crawl",
            Mode::Scrape => "scrape",
            Mode::Map => "map",
            Mode::Extract => "extract",
            Mode::Search => "search",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "crawl" => Ok(Mode::Crawl),
            "scrape" => Ok(Mode::Scrape),
            "map" => Ok(Mode::Map),
            "extract" => Ok(Mode::Extract),
            "search" => Ok(Mode::Search),
            other => Err(LoaderError::InvalidMode(other.to_string())),
        }
    }
}

/// Loads documents through the Firecrawl API.
///
/// # Example
///
/// ```rust,ignore
/// use document_loaders::{DocumentLoader, FireCrawlLoader, Mode};
///
/// let loader = FireCrawlLoader::builder("https://firecrawl.dev")
///     .mode(Mode::Scrape)
///     .param("includeHtml", true)
///     .build()?;
///
/// for doc in loader.lazy_load().await? {
///     println!("{}", &doc.page_content[..100]);
/// }
/// ```
pub struct FireCrawlLoader<C = FirecrawlClient> {
    client: C,
    url: String,
    mode: Mode,
    params: Params,
}

impl FireCrawlLoader {
    /// Start building a loader for `url`.
    pub fn builder(url: impl Into<String>) -> FireCrawlLoaderBuilder {
        FireCrawlLoaderBuilder::new(url)
    }
}

impl<C> FireCrawlLoader<C> {
    /// Swap the service client, keeping url, mode and params.
    pub fn with_client<D: FirecrawlApi>(self, client: D) -> FireCrawlLoader<D> {
        FireCrawlLoader {
            client,
            url: self.url,
            mode: self.mode,
            params: self.params,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Split the search query out of the params.
    fn search_request(&self) -> Result<(String, Params)> {
        let query = self
            .params
            .get("query")
            .and_then(Value::as_str)
            .ok_or(LoaderError::MissingQuery)?
            .to_string();

        let mut options = self.params.clone();
        options.remove("query");
        Ok((query, options))
    }
}

impl<C: FirecrawlApi> FireCrawlLoader<C> {
    async fn fetch_records(&self) -> Result<Vec<Record>> {
        let records = match self.mode {
            Mode::Scrape => {
                let options = normalize_scrape_options(&self.params);
                let page = self.client.scrape(&self.url, &options).await?;
                vec![Record::Page(page)]
            }
            Mode::Crawl => {
                let options = normalize_crawl_options(&self.params);
                let crawl = self.client.crawl(&self.url, &options).await?;
                crawl.data.into_iter().map(Record::Page).collect()
            }
            Mode::Map => {
                let links = self.client.map(&self.url, &self.params).await?;
                links.into_iter().map(Record::Text).collect()
            }
            Mode::Extract => {
                let result = self
                    .client
                    .extract(std::slice::from_ref(&self.url), &self.params)
                    .await?;
                vec![Record::Text(result.to_string())]
            }
            Mode::Search => {
                let (query, options) = self.search_request()?;
                let hits = self.client.search(&query, &options).await?;
                hits.into_iter().map(Record::Page).collect()
            }
        };

        Ok(records)
    }
}

#[async_trait]
impl<C: FirecrawlApi> DocumentLoader for FireCrawlLoader<C> {
    async fn lazy_load(&self) -> Result<DocumentIter> {
        info!(url = %self.url, mode = %self.mode, "Loading documents from Firecrawl");

        let records = self.fetch_records().await?;

        debug!(
            url = %self.url,
            mode = %self.mode,
            records = records.len(),
            "Firecrawl returned records"
        );

        Ok(Box::new(project(records)))
    }
}

impl<C> fmt::Debug for FireCrawlLoader<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FireCrawlLoader")
            .field("url", &self.url)
            .field("mode", &self.mode)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Builder for [`FireCrawlLoader`].
///
/// The API key falls back to `FIRECRAWL_API_KEY` and the API URL to
/// `FIRECRAWL_API_URL`, then to the public endpoint.
#[derive(Debug, Clone, Default)]
pub struct FireCrawlLoaderBuilder {
    url: String,
    mode: Mode,
    params: Params,
    api_key: Option<ApiKey>,
    api_url: Option<String>,
}

impl FireCrawlLoaderBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the mode (default: crawl).
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace all request params.
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Set a single request param.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<ApiKey>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Validate the configuration and create the HTTP client.
    pub fn build(self) -> Result<FireCrawlLoader> {
        if self.url.is_empty() {
            return Err(LoaderError::MissingUrl);
        }

        let api_key = resolve_api_key(self.api_key, API_KEY_VAR)?;
        let mut client = FirecrawlClient::new(api_key.expose());
        if let Some(api_url) = self.api_url.or_else(|| env_setting(API_URL_VAR)) {
            client = client.with_api_url(api_url);
        }

        debug!(url = %self.url, mode = %self.mode, api_url = client.api_url(), "Built Firecrawl loader");

        Ok(FireCrawlLoader {
            client,
            url: self.url,
            mode: self.mode,
            params: self.params,
        })
    }
}
