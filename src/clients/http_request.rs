//! HTTP request types for the Handwrytten SDK.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! describing one logical API call. A request is an immutable value
//! constructed fresh per invocation; the transport re-encodes its payload
//! on every retry attempt.

use std::fmt;

use serde_json::Value;

/// HTTP methods used by the Handwrytten API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// One named file in a multipart upload.
///
/// The bytes are owned so the multipart form can be rebuilt for each retry
/// attempt — a `reqwest` multipart body is consumed on send.
#[derive(Clone, Debug)]
pub struct FilePart {
    /// The form field name (e.g. `"file"`).
    pub name: String,
    /// The file name reported to the server.
    pub file_name: String,
    /// The file contents.
    pub bytes: Vec<u8>,
    /// The MIME type of the contents.
    pub mime_type: String,
}

/// The body of a request.
#[derive(Clone, Debug)]
pub enum Payload {
    /// A JSON body, sent with `Content-Type: application/json`.
    Json(Value),
    /// A multipart form body. The content type (and boundary) is set by the
    /// transport automatically.
    Multipart {
        /// Named file parts.
        parts: Vec<FilePart>,
        /// Scalar form fields sent alongside the files.
        fields: Vec<(String, String)>,
    },
}

/// An HTTP request to be executed against the Handwrytten API.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder
/// pattern.
///
/// # Example
///
/// ```rust
/// use handwrytten::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Post, "orders/placeBasket")
///     .json(json!({"card_id": 3404}))
///     .idempotency_key("order-7d1f")
///     .build();
///
/// assert_eq!(request.path, "orders/placeBasket");
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The endpoint path, relative to the configured base URL.
    pub path: String,
    /// Query parameters to append to the URL.
    pub query: Option<Vec<(String, String)>>,
    /// The request body, if any.
    pub payload: Option<Payload>,
    /// Idempotency token sent as the `Idempotency-Key` header, allowing
    /// safe retries of otherwise-mutating calls.
    pub idempotency_key: Option<String>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder {
            method,
            path: path.into(),
            query: None,
            payload: None,
            idempotency_key: None,
        }
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    method: HttpMethod,
    path: String,
    query: Option<Vec<(String, String)>>,
    payload: Option<Payload>,
    idempotency_key: Option<String>,
}

impl HttpRequestBuilder {
    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = Some(query);
        self
    }

    /// Sets a JSON request body.
    #[must_use]
    pub fn json(mut self, body: impl Into<Value>) -> Self {
        self.payload = Some(Payload::Json(body.into()));
        self
    }

    /// Sets a multipart form body of file parts plus scalar fields.
    #[must_use]
    pub fn multipart(mut self, parts: Vec<FilePart>, fields: Vec<(String, String)>) -> Self {
        self.payload = Some(Payload::Multipart { parts, fields });
        self
    }

    /// Sets the idempotency key for safe retries of mutating calls.
    #[must_use]
    pub fn idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Builds the [`HttpRequest`].
    #[must_use]
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            method: self.method,
            path: self.path,
            query: self.query,
            payload: self.payload,
            idempotency_key: self.idempotency_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_builder_creates_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "cards/list").build();

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "cards/list");
        assert!(request.query.is_none());
        assert!(request.payload.is_none());
        assert!(request.idempotency_key.is_none());
    }

    #[test]
    fn test_builder_with_query_params() {
        let request = HttpRequest::builder(HttpMethod::Get, "orders/list")
            .query_param("page", "1")
            .query_param("per_page", "50")
            .build();

        let query = request.query.unwrap();
        assert_eq!(query[0], ("page".to_string(), "1".to_string()));
        assert_eq!(query[1], ("per_page".to_string(), "50".to_string()));
    }

    #[test]
    fn test_builder_with_json_body() {
        let request = HttpRequest::builder(HttpMethod::Post, "orders/placeBasket")
            .json(json!({"card_id": 3404}))
            .build();

        assert!(matches!(
            request.payload,
            Some(Payload::Json(body)) if body["card_id"] == 3404
        ));
    }

    #[test]
    fn test_builder_with_idempotency_key() {
        let request = HttpRequest::builder(HttpMethod::Post, "basket/send")
            .json(json!({}))
            .idempotency_key("send-1234")
            .build();

        assert_eq!(request.idempotency_key.as_deref(), Some("send-1234"));
    }

    #[test]
    fn test_builder_with_multipart_body() {
        let part = FilePart {
            name: "file".to_string(),
            file_name: "logo.png".to_string(),
            bytes: vec![1, 2, 3],
            mime_type: "image/png".to_string(),
        };
        let request = HttpRequest::builder(HttpMethod::Post, "cards/uploadCustomLogo")
            .multipart(vec![part], vec![("type".to_string(), "logo".to_string())])
            .build();

        match request.payload {
            Some(Payload::Multipart { parts, fields }) => {
                assert_eq!(parts.len(), 1);
                assert_eq!(parts[0].file_name, "logo.png");
                assert_eq!(fields[0].1, "logo");
            }
            other => panic!("expected multipart payload, got {other:?}"),
        }
    }
}
