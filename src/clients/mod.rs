//! HTTP transport for the Handwrytten API.
//!
//! This module contains the low-level request executor shared by every
//! resource facade:
//!
//! - [`HttpClient`]: authenticated request execution with retry and
//!   error classification
//! - [`HttpRequest`] / [`HttpRequestBuilder`]: immutable per-call request
//!   descriptors
//! - [`ApiError`]: the closed error taxonomy produced by the response
//!   classifier

mod errors;
mod http_client;
mod http_request;

pub use errors::ApiError;
pub use http_client::{HttpClient, RETRY_BACKOFF_SECS, USER_AGENT};
pub use http_request::{FilePart, HttpMethod, HttpRequest, HttpRequestBuilder, Payload};
