//! Image generation service trait.

use async_trait::async_trait;
use openai_client::{ImageGenerationRequest, ImagesResponse, OpenAIClient, OpenAIError};

/// Generates images for a fully built request.
#[async_trait]
pub trait ImageApi: Send + Sync {
    async fn generate(
        &self,
        request: &ImageGenerationRequest,
    ) -> std::result::Result<ImagesResponse, OpenAIError>;
}

#[async_trait]
impl ImageApi for OpenAIClient {
    async fn generate(
        &self,
        request: &ImageGenerationRequest,
    ) -> std::result::Result<ImagesResponse, OpenAIError> {
        self.generate_images(request).await
    }
}
