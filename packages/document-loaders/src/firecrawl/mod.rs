//! Firecrawl document loader.
//!
//! - [`options`] - legacy-to-current option translation
//! - [`projection`] - response records to documents
//! - [`loader`] - the loader itself

pub mod loader;
pub mod options;
pub mod projection;

pub use loader::{FireCrawlLoader, FireCrawlLoaderBuilder, Mode};
pub use options::{normalize_crawl_options, normalize_scrape_options, Format, Params};
pub use projection::{page_content, project, Projection, Record};
