//! Integration tests for the HTTP transport.
//!
//! These tests drive the retry loop, status classification, and header
//! handling against a local mock server.

use handwrytten::clients::{HttpClient, HttpMethod, HttpRequest};
use handwrytten::{ApiError, ApiKey, BaseUrl, Config};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a client pointed at the mock server with the given retry budget.
fn test_client(server: &MockServer, max_retries: u32) -> HttpClient {
    let config = Config::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .base_url(BaseUrl::new(format!("{}/v2", server.uri())).unwrap())
        .max_retries(max_retries)
        .timeout_secs(5)
        .build()
        .unwrap();
    HttpClient::new(config)
}

// ============================================================================
// Classification
// ============================================================================

#[tokio::test]
async fn test_status_code_classification_table() {
    let cases: [(u16, fn(&ApiError) -> bool); 6] = [
        (401, |e| matches!(e, ApiError::Authentication { .. })),
        (403, |e| matches!(e, ApiError::Authentication { .. })),
        (404, |e| matches!(e, ApiError::NotFound { .. })),
        (418, |e| matches!(e, ApiError::BadRequest { .. })),
        (422, |e| matches!(e, ApiError::BadRequest { .. })),
        (503, |e| matches!(e, ApiError::Server { .. })),
    ];

    for (status, expected) in cases {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/probe"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        // max_retries = 1 so retryable classes surface immediately too.
        let client = test_client(&server, 1);
        let error = client.get("probe", None).await.unwrap_err();
        assert!(expected(&error), "status {status} classified as {error:?}");
        assert_eq!(error.status(), Some(status));
    }
}

#[tokio::test]
async fn test_rate_limit_carries_retry_after_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/probe"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "17"))
        .mount(&server)
        .await;

    let client = test_client(&server, 1);
    let error = client.get("probe", None).await.unwrap_err();
    assert!(matches!(error, ApiError::RateLimit { .. }));
    assert_eq!(error.retry_after(), Some(17));
}

#[tokio::test]
async fn test_rate_limit_without_header_has_no_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/probe"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server, 1);
    let error = client.get("probe", None).await.unwrap_err();
    assert_eq!(error.retry_after(), None);
}

#[tokio::test]
async fn test_error_message_extracted_from_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/probe"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "card_id is required"})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server, 1);
    let error = client.get("probe", None).await.unwrap_err();
    assert_eq!(error.to_string(), "card_id is required (HTTP 400)");
    assert_eq!(
        error.response_body(),
        Some(&json!({"error": "card_id is required"}))
    );
}

#[tokio::test]
async fn test_plain_text_error_body_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/probe"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = test_client(&server, 1);
    let error = client.get("probe", None).await.unwrap_err();
    assert_eq!(error.to_string(), "upstream exploded (HTTP 500)");
    assert_eq!(error.response_body(), Some(&json!("upstream exploded")));
}

// ============================================================================
// Retry policy
// ============================================================================

#[tokio::test]
async fn test_server_errors_exhaust_retry_budget_exactly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/probe"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server, 3);
    let error = client.get("probe", None).await.unwrap_err();

    // The final failure is raised, not swallowed.
    assert!(matches!(error, ApiError::Server { .. }));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_rate_limit_honors_retry_after_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/probe"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/probe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let client = test_client(&server, 3);
    let body = client.get("probe", None).await.unwrap();
    assert_eq!(body, json!({"ok": true}));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_non_retryable_classes_send_exactly_one_request() {
    for status in [400_u16, 401, 404] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/probe"))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&server)
            .await;

        // A generous budget must not matter for these classes.
        let client = test_client(&server, 5);
        let _ = client.get("probe", None).await.unwrap_err();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1, "status {status} was retried");
    }
}

#[tokio::test]
async fn test_absolute_url_as_path_rejected_locally() {
    let server = MockServer::start().await;
    let client = test_client(&server, 1);

    let error = client
        .get("https://elsewhere.example.com/x", None)
        .await
        .unwrap_err();
    assert!(matches!(error, ApiError::InvalidPath { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_connection_failure_surfaces_as_transport() {
    // Point at a port nothing listens on.
    let config = Config::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .base_url(BaseUrl::new("http://127.0.0.1:1/v2").unwrap())
        .max_retries(1)
        .timeout_secs(2)
        .build()
        .unwrap();
    let client = HttpClient::new(config);

    let error = client.get("probe", None).await.unwrap_err();
    assert!(matches!(error, ApiError::Transport(_)));
    assert_eq!(error.status(), None);
}

// ============================================================================
// Headers and bodies
// ============================================================================

#[tokio::test]
async fn test_auth_and_agent_headers_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/probe"))
        .and(header("Authorization", "test-key"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, 1);
    client.get("probe", None).await.unwrap();
}

#[tokio::test]
async fn test_idempotency_key_sent_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/basket/send"))
        .and(header("Idempotency-Key", "send-7d1f-0042"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, 1);
    client
        .post("basket/send", json!({}), Some("send-7d1f-0042".to_string()))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_query_parameters_appended() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/orders/list"))
        .and(wiremock::matchers::query_param("page", "2"))
        .and(wiremock::matchers::query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, 1);
    client
        .get(
            "orders/list",
            Some(vec![
                ("page".to_string(), "2".to_string()),
                ("per_page".to_string(), "10".to_string()),
            ]),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_json_body_sent_with_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders/placeBasket"))
        .and(header("Content-Type", "application/json"))
        .and(wiremock::matchers::body_json(json!({"card_id": 3404})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"order_id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, 1);
    let body = client
        .post("orders/placeBasket", json!({"card_id": 3404}), None)
        .await
        .unwrap();
    assert_eq!(body, json!({"order_id": 1}));
}

#[tokio::test]
async fn test_empty_success_body_parses_as_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/qrCode/9/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = test_client(&server, 1);
    let body = client.delete("qrCode/9/").await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn test_non_json_success_body_returned_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/probe"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain ok"))
        .mount(&server)
        .await;

    let client = test_client(&server, 1);
    let body = client.get("probe", None).await.unwrap();
    assert_eq!(body, json!("plain ok"));
}

#[tokio::test]
async fn test_request_builder_round_trip_through_transport() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/profile/updateRecipient"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server, 1);
    let request = HttpRequest::builder(HttpMethod::Put, "profile/updateRecipient")
        .json(json!({"id": 5, "city": "Tempe"}))
        .build();
    let body = client.request(request).await.unwrap();
    assert_eq!(body["id"], 5);
}
