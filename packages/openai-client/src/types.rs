//! OpenAI API request and response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Image Generation
// =============================================================================

/// Image generation request (`POST /images/generations`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageGenerationRequest {
    /// Model to use (e.g., "dall-e-2", "dall-e-3")
    pub model: String,

    /// Text description of the desired image(s)
    pub prompt: String,

    /// Number of images to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,

    /// Image size (e.g., "1024x1024")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Image quality ("standard", "hd"). Only some models accept it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,

    /// Additional provider parameters, sent as top-level body fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ImageGenerationRequest {
    /// Create a new request for the given model and prompt.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            n: None,
            size: None,
            quality: None,
            extra: Map::new(),
        }
    }

    /// Set the number of images.
    pub fn n(mut self, n: u32) -> Self {
        self.n = Some(n);
        self
    }

    /// Set the image size.
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the image quality.
    pub fn quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    /// Add an extra body parameter.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Image generation response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub created: Option<i64>,

    #[serde(default)]
    pub data: Vec<ImageData>,
}

impl ImagesResponse {
    /// Build a response carrying the given image URLs.
    pub fn from_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            created: None,
            data: urls
                .into_iter()
                .map(|url| ImageData {
                    url: Some(url.into()),
                    ..Default::default()
                })
                .collect(),
        }
    }

    /// URLs of the generated images, in response order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.data.iter().filter_map(|d| d.url.as_deref())
    }
}

/// A single generated image.
///
/// Either `url` or `b64_json` is set, depending on `response_format`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,

    /// Prompt actually used by the model (dall-e-3 rewrites prompts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}
