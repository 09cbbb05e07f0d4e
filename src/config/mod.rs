//! Configuration types for the Handwrytten SDK.
//!
//! This module provides the core configuration types used to initialize the
//! SDK for API communication with Handwrytten.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Config`]: The main configuration struct holding all SDK settings
//! - [`ConfigBuilder`]: A builder for constructing [`Config`] instances
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`BaseUrl`]: A validated, slash-normalized base URL
//!
//! # Example
//!
//! ```rust
//! use handwrytten::{ApiKey, Config};
//!
//! let config = Config::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .timeout_secs(10)
//!     .max_retries(5)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.max_retries(), 5);
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl};

use crate::error::ConfigError;

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.handwrytten.com/v2/";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts for transient failures.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Configuration for the Handwrytten SDK.
///
/// This struct holds all settings fixed at client construction: the API key,
/// base URL, request timeout, and retry budget.
///
/// # Thread Safety
///
/// `Config` is `Clone`, `Send`, and `Sync`, making it safe to share across
/// threads and async tasks.
///
/// # Example
///
/// ```rust
/// use handwrytten::{ApiKey, Config};
///
/// let config = Config::builder()
///     .api_key(ApiKey::new("my-api-key").unwrap())
///     .build()
///     .unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    api_key: ApiKey,
    base_url: BaseUrl,
    timeout_secs: u64,
    max_retries: u32,
}

impl Config {
    /// Creates a new builder for constructing a `Config`.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the request timeout in seconds.
    #[must_use]
    pub const fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Returns the maximum number of attempts per logical request.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

/// Builder for constructing [`Config`] instances.
///
/// All settings except the API key have production defaults.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    api_key: Option<ApiKey>,
    base_url: Option<BaseUrl>,
    timeout_secs: Option<u64>,
    max_retries: Option<u32>,
}

impl ConfigBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, api_key: ApiKey) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Overrides the API base URL (default: production).
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the request timeout in seconds (default: 30).
    #[must_use]
    pub const fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Sets the maximum number of attempts for transient failures
    /// (default: 3). Must be at least 1.
    #[must_use]
    pub const fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Builds the [`Config`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if no API key was set,
    /// or [`ConfigError::InvalidMaxRetries`] if the retry budget is zero.
    pub fn build(self) -> Result<Config, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        let base_url = match self.base_url {
            Some(base_url) => base_url,
            None => BaseUrl::new(DEFAULT_BASE_URL)?,
        };

        let max_retries = self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES);
        if max_retries == 0 {
            return Err(ConfigError::InvalidMaxRetries);
        }

        Ok(Config {
            api_key,
            base_url,
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            max_retries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_api_key() {
        let result = Config::builder().build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));
    }

    #[test]
    fn test_builder_applies_defaults() {
        let config = Config::builder()
            .api_key(ApiKey::new("key").unwrap())
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs(), DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.max_retries(), DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_builder_rejects_zero_retries() {
        let result = Config::builder()
            .api_key(ApiKey::new("key").unwrap())
            .max_retries(0)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidMaxRetries)));
    }

    #[test]
    fn test_builder_accepts_overrides() {
        let config = Config::builder()
            .api_key(ApiKey::new("key").unwrap())
            .base_url(BaseUrl::new("https://staging.example.com/v2").unwrap())
            .timeout_secs(5)
            .max_retries(1)
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), "https://staging.example.com/v2/");
        assert_eq!(config.timeout_secs(), 5);
        assert_eq!(config.max_retries(), 1);
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Config>();
    }
}
