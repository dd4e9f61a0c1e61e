//! Errors returned by the images client.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OpenAIError>;

#[derive(Debug, Error)]
pub enum OpenAIError {
    /// `OPENAI_API_KEY` missing when building from the environment.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never got a response (DNS, TLS, per-request timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx from `/images/generations`, carrying the raw response body.
    /// Content-policy refusals and rate limits both land here.
    #[error("OpenAI API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The images payload did not deserialize.
    #[error("Parse error: {0}")]
    Parse(String),
}
