//! Document loaders backed by hosted APIs.
//!
//! Two thin adapters around remote services:
//!
//! - [`FireCrawlLoader`] turns Firecrawl scrape/crawl/map/extract/search
//!   results into [`Document`]s. Option maps written for the legacy Firecrawl
//!   API are translated to the current one before the call.
//! - [`DallEApiWrapper`] generates images with DALL-E and returns their URLs,
//!   sending only the parameters the chosen model accepts.
//!
//! # Usage
//!
//! ```rust,ignore
//! use document_loaders::{DocumentLoader, FireCrawlLoader, Mode};
//!
//! let loader = FireCrawlLoader::builder("https://firecrawl.dev")
//!     .mode(Mode::Crawl)
//!     .param("includes", serde_json::json!(["/blog/*"])) // legacy name, renamed
//!     .build()?;
//!
//! let docs = loader.load().await?;
//! ```
//!
//! # Modules
//!
//! - [`firecrawl`] - option normalisation, record projection, the loader
//! - [`dalle`] - request building and the image wrapper
//! - [`traits`] - service and loader traits
//! - [`testing`] - mock services

pub mod credentials;
pub mod dalle;
pub mod document;
pub mod error;
pub mod firecrawl;
pub mod testing;
pub mod traits;

pub use credentials::ApiKey;
pub use dalle::{DallEApiWrapper, DallEApiWrapperBuilder, ImageSettings, NO_IMAGE_GENERATED};
pub use document::Document;
pub use error::{LoaderError, Result};
pub use firecrawl::{
    normalize_crawl_options, normalize_scrape_options, project, FireCrawlLoader,
    FireCrawlLoaderBuilder, Format, Mode, Params, Record,
};
pub use traits::{DocumentIter, DocumentLoader, FirecrawlApi, ImageApi};
