//! API error taxonomy for the Handwrytten SDK.
//!
//! This module contains the [`ApiError`] type raised by the transport and
//! propagated unchanged through every resource facade, plus the response
//! classifier that maps HTTP status codes to error kinds.
//!
//! # Error Handling
//!
//! Exactly one kind is assigned per error, derived deterministically from
//! the status code at construction time:
//!
//! - 401/403 → [`ApiError::Authentication`]
//! - 404 → [`ApiError::NotFound`]
//! - 429 → [`ApiError::RateLimit`] (with the `Retry-After` hint when present)
//! - 500–599 → [`ApiError::Server`]
//! - any other ≥400 → [`ApiError::BadRequest`]
//!
//! Connection and timeout failures surface as [`ApiError::Transport`].
//! Caller-usage failures ([`ApiError::Address`], [`ApiError::Io`],
//! [`ApiError::InvalidPath`]) are raised locally, before any request is
//! issued.
//!
//! # Example
//!
//! ```rust,ignore
//! match client.cards().get("missing").await {
//!     Ok(card) => println!("{}", card.title),
//!     Err(ApiError::NotFound { message, .. }) => eprintln!("no such card: {message}"),
//!     Err(other) => eprintln!("request failed: {other}"),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::address::AddressError;

/// An error returned by the Handwrytten API or raised locally before a
/// request is sent.
///
/// The HTTP variants carry the extracted human message, the status code,
/// and the raw response body (structured or text, whichever was obtained)
/// for caller-side diagnostics.
#[derive(Debug, Error)]
pub enum ApiError {
    /// API authentication failed (401/403).
    #[error("{message} (HTTP {status})")]
    Authentication {
        /// Human-readable message extracted from the response.
        message: String,
        /// The HTTP status code.
        status: u16,
        /// The raw response body, if any.
        body: Option<Value>,
    },

    /// The request was malformed or had invalid parameters (other 4xx).
    #[error("{message} (HTTP {status})")]
    BadRequest {
        /// Human-readable message extracted from the response.
        message: String,
        /// The HTTP status code.
        status: u16,
        /// The raw response body, if any.
        body: Option<Value>,
    },

    /// The requested resource was not found (404).
    #[error("{message} (HTTP {status})")]
    NotFound {
        /// Human-readable message extracted from the response.
        message: String,
        /// The HTTP status code.
        status: u16,
        /// The raw response body, if any.
        body: Option<Value>,
    },

    /// The rate limit was exceeded (429). Retried automatically within the
    /// configured budget.
    #[error("{message} (HTTP {status})")]
    RateLimit {
        /// Human-readable message extracted from the response.
        message: String,
        /// The HTTP status code.
        status: u16,
        /// The raw response body, if any.
        body: Option<Value>,
        /// Seconds to wait, from the `Retry-After` header when present.
        retry_after: Option<u64>,
    },

    /// The API returned a server error (5xx). Retried automatically within
    /// the configured budget.
    #[error("{message} (HTTP {status})")]
    Server {
        /// Human-readable message extracted from the response.
        message: String,
        /// The HTTP status code.
        status: u16,
        /// The raw response body, if any.
        body: Option<Value>,
    },

    /// A connection or timeout failure before a response was received.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A recipient, sender, or free-text address could not be resolved.
    /// Raised before any request is issued.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// A local file could not be read for upload.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An endpoint path could not be resolved against the base URL.
    #[error("Invalid request path '{path}'")]
    InvalidPath {
        /// The path that failed to resolve.
        path: String,
    },
}

impl ApiError {
    /// Returns the HTTP status code, if this error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. }
            | Self::BadRequest { status, .. }
            | Self::NotFound { status, .. }
            | Self::RateLimit { status, .. }
            | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body, if one was captured.
    #[must_use]
    pub const fn response_body(&self) -> Option<&Value> {
        match self {
            Self::Authentication { body, .. }
            | Self::BadRequest { body, .. }
            | Self::NotFound { body, .. }
            | Self::RateLimit { body, .. }
            | Self::Server { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Returns the `Retry-After` hint in seconds, present only on
    /// [`ApiError::RateLimit`] when the header was sent.
    #[must_use]
    pub const fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns `true` if the transport may retry this error.
    ///
    /// Rate-limit and server errors are retryable, as are connection and
    /// timeout failures. Authentication, bad-request, and not-found errors
    /// never are, nor is any locally-raised usage error.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimit { .. } | Self::Server { .. } => true,
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

/// Classifies an error response by status code.
///
/// `body` is the best-effort parsed response body (structured JSON, a text
/// body as a JSON string, or null when empty); it is preserved on the error
/// regardless of which message was extracted from it.
pub(crate) fn classify_status(status: u16, body: Value, retry_after: Option<u64>) -> ApiError {
    let body = if body.is_null() { None } else { Some(body) };

    match status {
        401 | 403 => ApiError::Authentication {
            message: extract_message(body.as_ref(), "Authentication failed"),
            status,
            body,
        },
        404 => ApiError::NotFound {
            message: extract_message(body.as_ref(), "Resource not found"),
            status,
            body,
        },
        429 => ApiError::RateLimit {
            message: extract_message(
                body.as_ref(),
                "Rate limit exceeded. Please retry after a delay.",
            ),
            status,
            body,
            retry_after,
        },
        500..=599 => ApiError::Server {
            message: extract_message(body.as_ref(), "Server error"),
            status,
            body,
        },
        _ => ApiError::BadRequest {
            message: extract_message(body.as_ref(), "Bad request"),
            status,
            body,
        },
    }
}

/// Keys searched, in order, for a human-readable message in an error body.
const MESSAGE_KEYS: [&str; 5] = ["message", "error", "errors", "detail", "msg"];

/// Pulls a human-readable error message out of a response body.
///
/// Mappings are searched for the well-known message keys; a sequence value
/// contributes its first element. Plain-text bodies contribute up to their
/// first 200 characters. Anything else falls back to `default`.
fn extract_message(body: Option<&Value>, default: &str) -> String {
    if let Some(map) = body.and_then(Value::as_object) {
        for key in MESSAGE_KEYS {
            if let Some(value) = map.get(key) {
                return match value {
                    Value::Array(items) => items.first().map_or_else(
                        || value_to_text(value),
                        value_to_text,
                    ),
                    other => value_to_text(other),
                };
            }
        }
    }

    if let Some(text) = body.and_then(Value::as_str) {
        if !text.is_empty() {
            return text.chars().take(200).collect();
        }
    }

    default.to_string()
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
