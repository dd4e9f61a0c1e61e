//! Trait seams between the loaders and the outside world.
//!
//! - [`DocumentLoader`] - what callers consume
//! - [`FirecrawlApi`] - the crawling service
//! - [`ImageApi`] - the image generation service
//!
//! The real clients implement the service traits; [`crate::testing`] provides
//! recording mocks.

pub mod firecrawl;
pub mod images;
pub mod loader;

pub use firecrawl::FirecrawlApi;
pub use images::ImageApi;
pub use loader::{DocumentIter, DocumentLoader};
