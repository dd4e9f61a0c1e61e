//! Generate images with DALL-E and print their URLs.
//!
//! ```sh
//! OPENAI_API_KEY=sk-... cargo run -p document-loaders --example dalle_generate -- "a lighthouse at dusk"
//! ```

use anyhow::{Context, Result};
use document_loaders::DallEApiWrapper;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let prompt = std::env::args()
        .nth(1)
        .context("usage: dalle_generate <prompt>")?;

    let wrapper = DallEApiWrapper::builder()
        .model("dall-e-3")
        .quality("hd")
        .separator("\n")
        .build()?;

    println!("{}", wrapper.run(&prompt).await?);

    Ok(())
}
