//! DALL-E wrapper: prompt in, image URLs out.

use openai_client::OpenAIClient;
use serde_json::{Map, Value};
use tracing::info;

use crate::dalle::request::{DallEApiWrapperBuilder, ImageSettings};
use crate::error::Result;
use crate::traits::ImageApi;

/// Returned by [`DallEApiWrapper::run`] when the service produced no URLs.
pub const NO_IMAGE_GENERATED: &str = "No image was generated";

/// Generates images for a prompt and returns their URLs as one string.
pub struct DallEApiWrapper<C = OpenAIClient> {
    client: C,
    settings: ImageSettings,
}

impl DallEApiWrapper {
    pub fn builder() -> DallEApiWrapperBuilder {
        DallEApiWrapperBuilder::new()
    }
}

impl<C> DallEApiWrapper<C> {
    pub(crate) fn new(client: C, settings: ImageSettings) -> Self {
        Self { client, settings }
    }

    /// Swap the service client, keeping the settings.
    pub fn with_client<D: ImageApi>(self, client: D) -> DallEApiWrapper<D> {
        DallEApiWrapper {
            client,
            settings: self.settings,
        }
    }

    pub fn settings(&self) -> &ImageSettings {
        &self.settings
    }

    /// Parameters passed through to the API without interpretation.
    pub fn model_kwargs(&self) -> &Map<String, Value> {
        &self.settings.model_kwargs
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: ImageApi> DallEApiWrapper<C> {
    /// Generate images for `prompt`.
    ///
    /// URLs come back joined by the configured separator, in the order the
    /// service reported them.
    pub async fn run(&self, prompt: &str) -> Result<String> {
        let request = self.settings.request(prompt);
        let response = self.client.generate(&request).await?;

        let urls: Vec<&str> = response.urls().collect();

        info!(
            model = %self.settings.model,
            requested = self.settings.n,
            returned = urls.len(),
            "DALL-E generation finished"
        );

        if urls.is_empty() {
            return Ok(NO_IMAGE_GENERATED.to_string());
        }

        Ok(urls.join(self.settings.separator.as_str()))
    }
}

impl<C> std::fmt::Debug for DallEApiWrapper<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DallEApiWrapper")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
