//! Scrape or crawl a URL with Firecrawl and print the documents.
//!
//! ```sh
//! FIRECRAWL_API_KEY=fc-... cargo run -p document-loaders --example firecrawl_scrape -- https://firecrawl.dev scrape
//! ```

use anyhow::{Context, Result};
use document_loaders::{DocumentLoader, FireCrawlLoader, Mode};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let url = args.next().context("usage: firecrawl_scrape <url> [mode]")?;
    let mode: Mode = args.next().as_deref().unwrap_or("scrape").parse()?;

    let loader = FireCrawlLoader::builder(url)
        .mode(mode)
        .param("includeHtml", true)
        .param("limit", 5)
        .build()?;

    for doc in loader.lazy_load().await? {
        let preview: String = doc.page_content.chars().take(100).collect();
        println!("=== {}", doc.metadata_str("sourceURL").unwrap_or("(no source)"));
        println!("{preview}");
    }

    Ok(())
}
