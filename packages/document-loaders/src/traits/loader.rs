//! Document loader trait.

use async_trait::async_trait;

use crate::document::Document;
use crate::error::Result;

/// Documents yielded by a loader after its remote call has completed.
pub type DocumentIter = Box<dyn Iterator<Item = Document> + Send>;

/// A source of documents.
///
/// `lazy_load` performs the remote work and returns an iterator that builds
/// documents on demand. The iterator is single pass; loading again means
/// calling the service again.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Fetch and lazily project documents.
    async fn lazy_load(&self) -> Result<DocumentIter>;

    /// Fetch and collect all documents.
    async fn load(&self) -> Result<Vec<Document>> {
        Ok(self.lazy_load().await?.collect())
    }
}
