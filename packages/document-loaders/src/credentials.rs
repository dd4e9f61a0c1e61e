//! API key handling and environment lookup.
//!
//! Keys are held in `secrecy` boxes so builders can be logged and debugged
//! without leaking them. Environment lookups load a `.env` file (if present)
//! the first time they run.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;
use std::sync::Once;

use crate::error::{LoaderError, Result};

/// An API key that is redacted in `Debug` and `Display` output.
pub struct ApiKey(SecretBox<str>);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(value.into().into_boxed_str()))
    }

    /// Expose the key for use in a request.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Read a non-empty setting from the environment (or `.env`).
pub(crate) fn env_setting(var: &str) -> Option<String> {
    static DOTENV: Once = Once::new();
    DOTENV.call_once(|| {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();
    });

    dotenvy::var(var).ok().filter(|value| !value.is_empty())
}

/// Use the explicit key if it is non-empty, else fall back to `var`.
pub(crate) fn resolve_api_key(explicit: Option<ApiKey>, var: &'static str) -> Result<ApiKey> {
    resolve_api_key_with(explicit, var, env_setting)
}

pub(crate) fn resolve_api_key_with(
    explicit: Option<ApiKey>,
    var: &'static str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ApiKey> {
    if let Some(key) = explicit.filter(|key| !key.is_empty()) {
        return Ok(key);
    }

    lookup(var)
        .map(ApiKey::new)
        .ok_or(LoaderError::MissingCredentials { var })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_is_redacted() {
        let key = ApiKey::new("fc-secret");
        assert_eq!(format!("{:?}", key), "ApiKey([REDACTED])");
        assert_eq!(key.to_string(), "[REDACTED]");
        assert_eq!(key.expose(), "fc-secret");
    }

    #[test]
    fn test_explicit_key_wins() {
        let key = resolve_api_key_with(Some("explicit".into()), "TEST_KEY", |_| {
            Some("from-env".to_string())
        })
        .unwrap();
        assert_eq!(key.expose(), "explicit");
    }

    #[test]
    fn test_empty_explicit_key_falls_back_to_env() {
        let key = resolve_api_key_with(Some("".into()), "TEST_KEY", |var| {
            assert_eq!(var, "TEST_KEY");
            Some("from-env".to_string())
        })
        .unwrap();
        assert_eq!(key.expose(), "from-env");
    }

    #[test]
    fn test_missing_key_names_variable() {
        let err = resolve_api_key_with(None, "TEST_KEY", |_| None).unwrap_err();
        assert!(matches!(err, LoaderError::MissingCredentials { var: "TEST_KEY" }));
        assert!(err.to_string().contains("TEST_KEY"));
    }
}
