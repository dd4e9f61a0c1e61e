//! Typed errors for the document loaders.
//!
//! Configuration problems are reported when a loader or wrapper is built (or,
//! for search queries, when the call starts). Failures of the remote services
//! are wrapped transparently and never retried.

use firecrawl_client::FirecrawlError;
use openai_client::OpenAIError;
use thiserror::Error;

/// Errors raised by loaders and wrappers.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Unknown loader mode
    #[error("Invalid mode '{0}'. Allowed: 'crawl', 'scrape', 'map', 'extract', 'search'.")]
    InvalidMode(String),

    /// Loader built without a URL
    #[error("Url must be provided")]
    MissingUrl,

    /// Search mode needs a `query` param
    #[error("query is required for search mode")]
    MissingQuery,

    /// No API key passed explicitly and none found in the environment
    #[error("Did not find an API key, please set the `{var}` environment variable or pass it explicitly")]
    MissingCredentials { var: &'static str },

    /// A recognised parameter had an unusable value, or a parameter was
    /// passed through the wrong channel
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Firecrawl request failed
    #[error(transparent)]
    Firecrawl(#[from] FirecrawlError),

    /// OpenAI request failed
    #[error(transparent)]
    OpenAI(#[from] OpenAIError),
}

/// Result type alias for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;
