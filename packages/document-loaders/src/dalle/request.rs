//! Request building for DALL-E image generation.
//!
//! Models differ in what they accept: only `dall-e-3` takes a `quality`.
//! [`ImageSettings::request`] applies that rule, and
//! [`DallEApiWrapperBuilder::param`] sorts free-form parameters into the ones
//! the wrapper understands and an extension map passed through to the API.

use openai_client::{ImageGenerationRequest, OpenAIClient};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

use crate::credentials::{env_setting, resolve_api_key_with, ApiKey};
use crate::dalle::wrapper::DallEApiWrapper;
use crate::error::{LoaderError, Result};

pub const DALL_E_2: &str = "dall-e-2";
pub const DALL_E_3: &str = "dall-e-3";

const API_KEY_VAR: &str = "OPENAI_API_KEY";
const API_BASE_VAR: &str = "OPENAI_API_BASE";
const ORGANIZATION_VARS: [&str; 2] = ["OPENAI_ORG_ID", "OPENAI_ORGANIZATION"];

/// Whether `model` accepts the `quality` parameter. Exact match only.
pub fn supports_quality(model: &str) -> bool {
    model == DALL_E_3
}

/// Generation parameters shared by every call of a wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSettings {
    pub model: String,
    pub n: u32,
    pub size: String,
    pub quality: Option<String>,
    /// Joins the URLs of multiple images in the wrapper's output
    pub separator: String,
    /// Parameters the wrapper does not interpret, sent as-is
    pub model_kwargs: Map<String, Value>,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            model: DALL_E_2.to_string(),
            n: 1,
            size: "1024x1024".to_string(),
            quality: Some("standard".to_string()),
            separator: ",".to_string(),
            model_kwargs: Map::new(),
        }
    }
}

impl ImageSettings {
    /// Build the exact request sent for `prompt`.
    pub fn request(&self, prompt: &str) -> ImageGenerationRequest {
        let mut request = ImageGenerationRequest::new(&self.model, prompt)
            .n(self.n)
            .size(&self.size);

        if supports_quality(&self.model) {
            request.quality = self.quality.clone();
        } else if self.quality.is_some() {
            debug!(model = %self.model, "Model does not take quality, omitting it");
        }

        request.extra = self.model_kwargs.clone();
        request
    }
}

/// A parameter the builder interprets itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Param {
    Model,
    N,
    Size,
    Quality,
    Separator,
    ApiKey,
    BaseUrl,
    Organization,
    Timeout,
}

/// Recognised parameter names, including aliases.
const PARAM_NAMES: &[(&str, Param)] = &[
    ("model", Param::Model),
    ("model_name", Param::Model),
    ("n", Param::N),
    ("size", Param::Size),
    ("quality", Param::Quality),
    ("separator", Param::Separator),
    ("api_key", Param::ApiKey),
    ("openai_api_key", Param::ApiKey),
    ("base_url", Param::BaseUrl),
    ("openai_api_base", Param::BaseUrl),
    ("organization", Param::Organization),
    ("openai_organization", Param::Organization),
    ("timeout", Param::Timeout),
    ("request_timeout", Param::Timeout),
];

fn lookup_param(key: &str) -> Option<Param> {
    PARAM_NAMES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, param)| *param)
}

/// Builder for [`DallEApiWrapper`].
///
/// # Example
///
/// ```rust,ignore
/// let wrapper = DallEApiWrapper::builder()
///     .model("dall-e-3")
///     .quality("hd")
///     .param("style", "natural") // not recognised: goes to model_kwargs
///     .build()?;
///
/// let urls = wrapper.run("a lighthouse at dusk").await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct DallEApiWrapperBuilder {
    settings: ImageSettings,
    api_key: Option<ApiKey>,
    base_url: Option<String>,
    organization: Option<String>,
    timeout: Option<Duration>,
    invalid: Option<String>,
}

impl DallEApiWrapperBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.settings.model = model.into();
        self
    }

    /// Number of images per call.
    pub fn n(mut self, n: u32) -> Self {
        self.settings.n = n;
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.settings.size = size.into();
        self
    }

    /// Image quality. Only sent to models that accept it.
    pub fn quality(mut self, quality: impl Into<String>) -> Self {
        self.settings.quality = Some(quality.into());
        self
    }

    /// Never send a quality, whatever the model.
    pub fn no_quality(mut self) -> Self {
        self.settings.quality = None;
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.settings.separator = separator.into();
        self
    }

    pub fn api_key(mut self, api_key: impl Into<ApiKey>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replace the extension map.
    ///
    /// Keys naming a recognised parameter are rejected at build time; set
    /// those through their own setter or [`param`](Self::param).
    pub fn model_kwargs(mut self, model_kwargs: Map<String, Value>) -> Self {
        self.settings.model_kwargs = model_kwargs;
        self
    }

    /// Set a parameter by name.
    ///
    /// Recognised names (and their aliases) go to the matching setter; any
    /// other name lands in the extension map. A recognised name with an
    /// unusable value is reported by [`build`](Self::build).
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();

        let Some(param) = lookup_param(&key) else {
            self.settings.model_kwargs.insert(key, value);
            return self;
        };

        match (param, value) {
            (Param::Model, Value::String(s)) => self.settings.model = s,
            (Param::Size, Value::String(s)) => self.settings.size = s,
            (Param::Separator, Value::String(s)) => self.settings.separator = s,
            (Param::Quality, Value::String(s)) => self.settings.quality = Some(s),
            (Param::Quality, Value::Null) => self.settings.quality = None,
            (Param::ApiKey, Value::String(s)) => self.api_key = Some(ApiKey::new(s)),
            (Param::BaseUrl, Value::String(s)) => self.base_url = Some(s),
            (Param::Organization, Value::String(s)) => self.organization = Some(s),
            (Param::N, Value::Number(n)) => match n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0)
            {
                Some(n) => self.settings.n = n,
                None => self.reject(&key, "expected a positive integer"),
            },
            (Param::Timeout, Value::Number(secs)) => {
                match secs.as_f64().map(Duration::try_from_secs_f64) {
                    Some(Ok(timeout)) => self.timeout = Some(timeout),
                    _ => self.reject(&key, "expected a non-negative number of seconds"),
                }
            }
            (Param::N | Param::Timeout, _) => self.reject(&key, "expected a number"),
            _ => self.reject(&key, "expected a string"),
        }
        self
    }

    fn reject(&mut self, key: &str, reason: &str) {
        if self.invalid.is_none() {
            self.invalid = Some(format!("{key}: {reason}"));
        }
    }

    /// Validate parameters, resolve credentials and create the HTTP client.
    ///
    /// Fails when no API key is given and `OPENAI_API_KEY` is unset.
    pub fn build(self) -> Result<DallEApiWrapper> {
        self.build_with(env_setting)
    }

    fn build_with(self, lookup: impl Fn(&str) -> Option<String>) -> Result<DallEApiWrapper> {
        if let Some(reason) = self.invalid {
            return Err(LoaderError::InvalidParameter(reason));
        }

        if let Some(key) = self
            .settings
            .model_kwargs
            .keys()
            .find(|key| lookup_param(key).is_some())
        {
            return Err(LoaderError::InvalidParameter(format!(
                "{key} should be specified explicitly, not passed in model_kwargs"
            )));
        }

        let api_key = resolve_api_key_with(self.api_key, API_KEY_VAR, &lookup)?;
        let mut client = OpenAIClient::new(api_key.expose());

        if let Some(base_url) = self.base_url.or_else(|| lookup(API_BASE_VAR)) {
            client = client.with_base_url(base_url);
        }
        let organization = self
            .organization
            .or_else(|| ORGANIZATION_VARS.iter().find_map(|var| lookup(var)));
        if let Some(organization) = organization {
            client = client.with_organization(organization);
        }
        if let Some(timeout) = self.timeout {
            client = client.with_timeout(timeout);
        }

        debug!(
            model = %self.settings.model,
            n = self.settings.n,
            extra_params = self.settings.model_kwargs.len(),
            "Built DALL-E wrapper"
        );

        Ok(DallEApiWrapper::new(client, self.settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(model: &str, quality: &str) -> ImageSettings {
        ImageSettings {
            model: model.to_string(),
            quality: Some(quality.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_quality_only_for_dalle3() {
        for (model, quality, included) in [
            (DALL_E_2, "hd", false),
            (DALL_E_2, "standard", false),
            (DALL_E_3, "hd", true),
            (DALL_E_3, "standard", true),
        ] {
            let request = settings(model, quality).request("test image");

            assert_eq!(request.model, model);
            if included {
                assert_eq!(request.quality.as_deref(), Some(quality));
            } else {
                assert!(request.quality.is_none());
                let body = serde_json::to_value(&request).unwrap();
                assert!(body.get("quality").is_none());
            }
        }
    }

    #[test]
    fn test_quality_match_is_exact() {
        assert!(supports_quality("dall-e-3"));
        assert!(!supports_quality("dall-e-3-preview"));
        assert!(!supports_quality("DALL-E-3"));
        assert!(!supports_quality("dall-e-2"));
    }

    #[test]
    fn test_defaults() {
        let request = ImageSettings::default().request("a cat");
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({"model": "dall-e-2", "prompt": "a cat", "n": 1, "size": "1024x1024"})
        );
    }

    #[test]
    fn test_unknown_param_goes_to_model_kwargs() {
        let builder = DallEApiWrapperBuilder::new().param("invalid_parameter", "value");

        assert_eq!(
            Value::Object(builder.settings.model_kwargs.clone()),
            json!({"invalid_parameter": "value"})
        );
        assert!(builder.invalid.is_none());
    }

    #[test]
    fn test_known_params_and_aliases_route_to_fields() {
        let builder = DallEApiWrapperBuilder::new()
            .param("model_name", "dall-e-3")
            .param("n", 2)
            .param("size", "1792x1024")
            .param("quality", "hd")
            .param("separator", "|")
            .param("openai_api_key", "sk-alias")
            .param("request_timeout", 30);

        assert_eq!(builder.settings.model, "dall-e-3");
        assert_eq!(builder.settings.n, 2);
        assert_eq!(builder.settings.size, "1792x1024");
        assert_eq!(builder.settings.quality.as_deref(), Some("hd"));
        assert_eq!(builder.settings.separator, "|");
        assert_eq!(builder.api_key.as_ref().map(ApiKey::expose), Some("sk-alias"));
        assert_eq!(builder.timeout, Some(Duration::from_secs(30)));
        assert!(builder.settings.model_kwargs.is_empty());
    }

    #[test]
    fn test_extension_map_is_flattened_into_request() {
        let settings = ImageSettings {
            model_kwargs: json!({"style": "vivid", "user": "u-1"})
                .as_object()
                .cloned()
                .unwrap(),
            ..Default::default()
        };

        let body = serde_json::to_value(settings.request("x")).unwrap();

        assert_eq!(body["style"], json!("vivid"));
        assert_eq!(body["user"], json!("u-1"));
    }

    #[test]
    fn test_bad_value_for_known_param_fails_build() {
        let err = DallEApiWrapperBuilder::new()
            .api_key("sk-test")
            .param("n", "two")
            .build()
            .unwrap_err();

        assert!(matches!(err, LoaderError::InvalidParameter(ref m) if m.starts_with("n:")));
    }

    #[test]
    fn test_zero_images_fails_build() {
        let err = DallEApiWrapperBuilder::new()
            .api_key("sk-test")
            .param("n", 0)
            .build()
            .unwrap_err();

        assert!(matches!(err, LoaderError::InvalidParameter(ref m) if m.starts_with("n:")));
    }

    #[test]
    fn test_out_of_range_timeout_fails_build() {
        for secs in [1e30, -1.0] {
            let err = DallEApiWrapperBuilder::new()
                .api_key("sk-test")
                .param("request_timeout", secs)
                .build()
                .unwrap_err();

            assert!(
                matches!(err, LoaderError::InvalidParameter(ref m) if m.starts_with("request_timeout:")),
                "{secs} should be rejected"
            );
        }
    }

    #[test]
    fn test_timeout_in_seconds_is_applied() {
        let wrapper = DallEApiWrapperBuilder::new()
            .api_key("sk-test")
            .param("timeout", 2.5)
            .build()
            .unwrap();

        assert_eq!(wrapper.client().timeout(), Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_missing_api_key_fails_build() {
        let err = DallEApiWrapperBuilder::new().build_with(|_| None).unwrap_err();

        assert!(matches!(
            err,
            LoaderError::MissingCredentials { var: "OPENAI_API_KEY" }
        ));
    }

    #[test]
    fn test_settings_fall_back_to_environment() {
        let wrapper = DallEApiWrapperBuilder::new()
            .build_with(|var| match var {
                "OPENAI_API_KEY" => Some("sk-env".to_string()),
                "OPENAI_API_BASE" => Some("https://proxy.example/v1".to_string()),
                "OPENAI_ORGANIZATION" => Some("org-env".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(wrapper.client().base_url(), "https://proxy.example/v1");
        assert_eq!(wrapper.client().organization(), Some("org-env"));
    }

    #[test]
    fn test_known_param_in_model_kwargs_fails_build() {
        let err = DallEApiWrapperBuilder::new()
            .api_key("sk-test")
            .model_kwargs(json!({"quality": "hd"}).as_object().cloned().unwrap())
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("quality should be specified explicitly"));
    }
}
