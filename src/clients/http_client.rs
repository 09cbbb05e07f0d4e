//! HTTP client for Handwrytten API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the Handwrytten API with automatic retry handling.
//!
//! One retry executor serves both JSON and multipart requests: the payload
//! is re-encoded from its owned description on every attempt, so the two
//! call paths cannot drift.

use std::time::Duration;

use reqwest::header;
use serde_json::Value;
use url::Url;

use crate::clients::errors::{classify_status, ApiError};
use crate::clients::http_request::{HttpMethod, HttpRequest, Payload};
use crate::config::Config;

/// Base delay for exponential backoff, in seconds.
pub const RETRY_BACKOFF_SECS: u64 = 1;

/// User-Agent header sent on every request.
pub const USER_AGENT: &str = concat!("handwrytten-rust/", env!("CARGO_PKG_VERSION"));

/// HTTP client for making requests to the Handwrytten API.
///
/// The client handles:
/// - URL resolution against the configured base URL
/// - Default headers including `Authorization` and User-Agent
/// - Automatic retry with exponential backoff for 429 and 5xx responses
///   and for connection/timeout failures
/// - Classification of error responses into the [`ApiError`] taxonomy
///
/// # Retry policy
///
/// A logical request is attempted at most `max_retries` times. Rate-limit
/// and server errors sleep `1s * 2^attempt` between attempts (no jitter,
/// no cap), except that a 429 carrying a `Retry-After` header sleeps that
/// many seconds instead. Authentication, bad-request, and not-found errors
/// are never retried. The final failure is always raised, never swallowed.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async
/// tasks. One client instance owns its connection pool for its lifetime.
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Configuration fixed at construction.
    config: Config,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: Config) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.timeout_secs()))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Executes a request with automatic retries and error classification.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on a terminal failure: the classified error for
    /// a non-retryable response, the last classified error once the retry
    /// budget is exhausted, or [`ApiError::Transport`] for a final
    /// connection/timeout failure.
    pub async fn request(&self, request: HttpRequest) -> Result<Value, ApiError> {
        // Relative endpoint paths only; an absolute URL would replace the
        // configured base entirely.
        if request.path.contains("://") {
            return Err(ApiError::InvalidPath {
                path: request.path.clone(),
            });
        }
        let url = self
            .config
            .base_url()
            .join(&request.path)
            .map_err(|_| ApiError::InvalidPath {
                path: request.path.clone(),
            })?;

        let max_retries = self.config.max_retries();
        let mut attempt: u32 = 0;

        loop {
            tracing::debug!(
                method = %request.method,
                %url,
                attempt = attempt + 1,
                max_retries,
                "sending request"
            );

            let error = match self.send_once(&request, url.clone()).await {
                Ok(body) => return Ok(body),
                Err(error) => error,
            };

            attempt += 1;
            if !error.is_retryable() || attempt >= max_retries {
                return Err(error);
            }

            // Retry-After takes precedence over backoff for rate limits.
            let wait = error
                .retry_after()
                .map_or_else(|| backoff(attempt - 1), Duration::from_secs);
            tracing::warn!(
                attempt,
                max_retries,
                wait_secs = wait.as_secs(),
                %error,
                "retryable error, waiting before next attempt"
            );
            tokio::time::sleep(wait).await;
        }
    }

    /// Builds and sends one attempt, classifying the outcome.
    async fn send_once(&self, request: &HttpRequest, url: Url) -> Result<Value, ApiError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        builder = builder
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, self.config.api_key().as_ref())
            .header(header::USER_AGENT, USER_AGENT);

        if let Some(key) = &request.idempotency_key {
            builder = builder.header("Idempotency-Key", key);
        }

        if let Some(query) = &request.query {
            builder = builder.query(query);
        }

        builder = match &request.payload {
            // reqwest sets Content-Type: application/json here, and the
            // multipart content type (with boundary) below.
            Some(Payload::Json(body)) => builder.json(body),
            Some(Payload::Multipart { parts, fields }) => {
                let mut form = reqwest::multipart::Form::new();
                for part in parts {
                    let file = reqwest::multipart::Part::bytes(part.bytes.clone())
                        .file_name(part.file_name.clone())
                        .mime_str(&part.mime_type)?;
                    form = form.part(part.name.clone(), file);
                }
                for (name, value) in fields {
                    form = form.text(name.clone(), value.clone());
                }
                builder.multipart(form)
            }
            None => builder,
        };

        let response = builder.send().await?;
        Self::handle_response(response).await
    }

    /// Parses a received response: a body for success, a classified
    /// [`ApiError`] for status >= 400.
    async fn handle_response(response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());

        let text = response.text().await.unwrap_or_default();
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if status < 400 {
            return Ok(body);
        }

        Err(classify_status(status, body, retry_after))
    }

    /// Convenience wrapper for GET requests.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn get(
        &self,
        path: &str,
        query: Option<Vec<(String, String)>>,
    ) -> Result<Value, ApiError> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, path);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        self.request(builder.build()).await
    }

    /// Convenience wrapper for POST requests with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn post(
        &self,
        path: &str,
        body: Value,
        idempotency_key: Option<String>,
    ) -> Result<Value, ApiError> {
        let mut builder = HttpRequest::builder(HttpMethod::Post, path).json(body);
        if let Some(key) = idempotency_key {
            builder = builder.idempotency_key(key);
        }
        self.request(builder.build()).await
    }

    /// Convenience wrapper for POST requests with a multipart body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn post_multipart(
        &self,
        path: &str,
        parts: Vec<crate::clients::FilePart>,
        fields: Vec<(String, String)>,
    ) -> Result<Value, ApiError> {
        self.request(
            HttpRequest::builder(HttpMethod::Post, path)
                .multipart(parts, fields)
                .build(),
        )
        .await
    }

    /// Convenience wrapper for PUT requests with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn put(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.request(HttpRequest::builder(HttpMethod::Put, path).json(body).build())
            .await
    }

    /// Convenience wrapper for DELETE requests.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::request`].
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(HttpRequest::builder(HttpMethod::Delete, path).build())
            .await
    }
}

/// Exponential backoff delay for the given zero-indexed attempt.
fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(RETRY_BACKOFF_SECS << attempt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiKey;

    fn test_config() -> Config {
        Config::builder()
            .api_key(ApiKey::new("test-key").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_construction() {
        let client = HttpClient::new(test_config());
        assert_eq!(client.config().max_retries(), 3);
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }

    #[test]
    fn test_backoff_doubles_per_attempt() {
        assert_eq!(backoff(0), Duration::from_secs(1));
        assert_eq!(backoff(1), Duration::from_secs(2));
        assert_eq!(backoff(2), Duration::from_secs(4));
        assert_eq!(backoff(3), Duration::from_secs(8));
    }

    #[test]
    fn test_user_agent_format() {
        assert!(USER_AGENT.starts_with("handwrytten-rust/"));
    }
}
