//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use std::fmt;

use url::Url;

use crate::error::ConfigError;

/// A validated Handwrytten API key.
///
/// This newtype ensures the API key is non-empty and masks its value in
/// debug output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the key, displaying only
/// `ApiKey(*****)` instead of the actual value.
///
/// # Example
///
/// ```rust
/// use handwrytten::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// assert_eq!(format!("{key:?}"), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated API base URL.
///
/// This newtype validates the URL on construction and normalizes it to end
/// with a trailing slash so relative endpoint paths join underneath it
/// rather than replacing the final path segment.
///
/// # Example
///
/// ```rust
/// use handwrytten::BaseUrl;
///
/// let base = BaseUrl::new("https://api.handwrytten.com/v2").unwrap();
/// assert_eq!(base.as_ref(), "https://api.handwrytten.com/v2/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the value is not an
    /// absolute URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let normalized = if raw.ends_with('/') {
            raw.clone()
        } else {
            format!("{raw}/")
        };
        let parsed = Url::parse(&normalized)
            .map_err(|_| ConfigError::InvalidBaseUrl { url: raw.clone() })?;
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl { url: raw });
        }
        Ok(Self(parsed))
    }

    /// Resolves an endpoint path against this base URL.
    ///
    /// Leading slashes on `path` are stripped so the path always resolves
    /// underneath the base, never at the host root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the joined value is not a
    /// valid URL.
    pub fn join(&self, path: &str) -> Result<Url, ConfigError> {
        self.0
            .join(path.trim_start_matches('/'))
            .map_err(|_| ConfigError::InvalidBaseUrl {
                url: format!("{}{path}", self.0),
            })
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
