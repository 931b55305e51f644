//! Integration tests for the API call wrappers.
//!
//! These tests verify that `get`, `post`, `put` and `delete` build the
//! expected requests and hand back raw responses whatever their status.

use std::net::TcpListener;
use std::time::{Duration, Instant};

use mercadolibre_api::{
    ApiUrl, ClientId, ClientSecret, HttpTransport, MeliClient, MeliConfig, MeliError,
    RequestParams,
};
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_config(api_url: &str) -> MeliConfig {
    MeliConfig::builder()
        .client_id(ClientId::new(123_456))
        .client_secret(ClientSecret::new("client secret").unwrap())
        .api_url(ApiUrl::new(api_url).unwrap())
        .build()
        .unwrap()
}

fn create_test_client(api_url: &str) -> MeliClient {
    MeliClient::new(create_test_config(api_url), HttpTransport::new().unwrap())
}

// ============================================================================
// GET Tests
// ============================================================================

#[tokio::test]
async fn test_get_returns_raw_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sites"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-request-id", "req-1")
                .set_body_string(r#"[{"id":"MLA","name":"Argentina"}]"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let response = client.get("/sites").await.unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(response.body, r#"[{"id":"MLA","name":"Argentina"}]"#);
    assert_eq!(response.request_id(), Some("req-1"));
    assert_eq!(response.json().unwrap()[0]["id"], "MLA");
}

#[tokio::test]
async fn test_get_with_access_token_param() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(query_param("access_token", "valid token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 8_675_309,
            "nickname": "TEST_USER"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let params = RequestParams::new().with_access_token("valid token");
    let response = client.get_with_params("/users/me", &params).await.unwrap();

    assert!(response.is_ok());
    assert_eq!(response.json().unwrap()["nickname"], "TEST_USER");
}

#[tokio::test]
async fn test_get_forbidden_is_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "message": "invalid_token",
            "status": 403
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let params = RequestParams::new().with_access_token("expired token");
    let response = client.get_with_params("/users/me", &params).await.unwrap();

    assert_eq!(response.code, 403);
    assert!(!response.is_ok());
    assert_eq!(response.json().unwrap()["message"], "invalid_token");
}

#[tokio::test]
async fn test_server_error_is_returned_once_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items/MLA1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let response = client.get("/items/MLA1").await.unwrap();

    assert_eq!(response.code, 500);
    assert_eq!(response.body, "internal error");
}

#[tokio::test]
async fn test_duplicate_params_are_sent_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let params = RequestParams::new()
        .param("ids", "MLA1")
        .param("ids", "MLA2")
        .param("attributes", "id,price");
    client.get_with_params("/items", &params).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url.query(),
        Some("ids=MLA1&ids=MLA2&attributes=id%2Cprice")
    );
}

#[tokio::test]
async fn test_get_without_params_has_no_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sites/MLA"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    client.get("/sites/MLA").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_user_agent_includes_configured_prefix() {
    let mock_server = MockServer::start().await;
    let expected = format!("MyApp/2.0 | MELI-RUST-SDK/{}", mercadolibre_api::SDK_VERSION);

    Mock::given(method("GET"))
        .and(header("user-agent", expected.as_str()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = MeliConfig::builder()
        .client_id(ClientId::new(1))
        .client_secret(ClientSecret::new("secret").unwrap())
        .api_url(ApiUrl::new(mock_server.uri()).unwrap())
        .user_agent_prefix("MyApp/2.0")
        .build()
        .unwrap();
    let client = MeliClient::new(config, HttpTransport::new().unwrap());

    client.get("/sites").await.unwrap();
}

#[tokio::test]
async fn test_get_and_delete_send_no_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let params = RequestParams::new().with_access_token("valid token");
    client.get_with_params("/users/me", &params).await.unwrap();
    client.delete("/questions/123", &params).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert!(
            !request
                .headers
                .keys()
                .any(|name| name.as_str().eq_ignore_ascii_case("content-type")),
            "unexpected content-type on {}",
            request.method
        );
        assert!(request.body.is_empty());
    }
}

// ============================================================================
// POST / PUT / DELETE Tests
// ============================================================================

#[tokio::test]
async fn test_post_sends_json_body() {
    let mock_server = MockServer::start().await;
    let item = serde_json::json!({
        "title": "Item de test",
        "category_id": "MLA3530",
        "price": 10,
        "currency_id": "ARS",
        "available_quantity": 1
    });

    Mock::given(method("POST"))
        .and(path("/items"))
        .and(query_param("access_token", "valid token"))
        .and(header("content-type", "application/json"))
        .and(body_json(&item))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "MLA123",
            "title": "Item de test"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let params = RequestParams::new().with_access_token("valid token");
    let response = client.post("/items", &params, &item).await.unwrap();

    assert_eq!(response.code, 201);
    assert_eq!(response.json().unwrap()["id"], "MLA123");
}

#[tokio::test]
async fn test_post_with_invalid_token_returns_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let params = RequestParams::new().with_access_token("invalid token");
    let response = client
        .post("/items", &params, &serde_json::json!({}))
        .await
        .unwrap();

    assert_eq!(response.code, 403);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_put_sends_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/items/MLA123"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"title":"changed"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "MLA123",
            "title": "changed"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let params = RequestParams::new().with_access_token("valid token");
    let response = client
        .put(
            "/items/MLA123",
            &params,
            &serde_json::json!({"title": "changed"}),
        )
        .await
        .unwrap();

    assert_eq!(response.code, 200);
}

#[tokio::test]
async fn test_delete_sends_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/questions/123"))
        .and(query_param("access_token", "valid token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let params = RequestParams::new().with_access_token("valid token");
    let response = client.delete("/questions/123", &params).await.unwrap();

    assert_eq!(response.code, 200);
}

// ============================================================================
// Transport Tests
// ============================================================================

/// Returns the URL of a local port with nothing listening on it.
fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let client = create_test_client(&unreachable_url());
    let result = client.get("/sites").await;

    assert!(matches!(result, Err(MeliError::Network(_))));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error_for_every_verb() {
    let client = create_test_client(&unreachable_url());
    let params = RequestParams::new().with_access_token("valid token");
    let body = serde_json::json!({"title": "Item de test"});

    let post = client.post("/items", &params, &body).await;
    let put = client.put("/items/MLA123", &params, &body).await;
    let delete = client.delete("/items/MLA123", &params).await;

    assert!(matches!(post, Err(MeliError::Network(_))));
    assert!(matches!(put, Err(MeliError::Network(_))));
    assert!(matches!(delete, Err(MeliError::Network(_))));
}

#[tokio::test]
async fn test_connection_cap_serializes_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sites"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(200)))
        .expect(4)
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::builder().max_connections(1).build().unwrap();
    let client = MeliClient::new(create_test_config(&mock_server.uri()), transport);

    let started = Instant::now();
    let (a, b, c, d) = tokio::join!(
        client.get("/sites"),
        client.get("/sites"),
        client.get("/sites"),
        client.get("/sites")
    );
    let elapsed = started.elapsed();

    for response in [a, b, c, d] {
        assert_eq!(response.unwrap().code, 200);
    }
    assert!(
        elapsed >= Duration::from_millis(750),
        "requests overlapped: finished in {elapsed:?}"
    );
    assert_eq!(client.transport().available_connections(), 1);
}

#[tokio::test]
async fn test_clients_share_one_transport() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::builder()
        .max_connections(2)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let first = MeliClient::new(create_test_config(&mock_server.uri()), transport.clone());
    let second = MeliClient::new(create_test_config(&mock_server.uri()), transport.clone());

    let (a, b) = tokio::join!(first.get("/sites"), second.get("/currencies"));
    assert_eq!(a.unwrap().code, 200);
    assert_eq!(b.unwrap().code, 200);

    transport.close();
    assert_eq!(first.transport().max_connections(), 2);
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::builder()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let client = MeliClient::new(create_test_config(&mock_server.uri()), transport);

    let result = client.get("/sites").await;
    assert!(matches!(result, Err(MeliError::Network(e)) if e.is_timeout()));
}
