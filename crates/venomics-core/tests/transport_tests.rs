//! Integration tests for the authenticated transport and session check.

mod common;

use common::*;
use venomics_core::AppError;
use venomics_core::error::{ApiError, AuthError};
use wiremock::matchers::{body_json, header, method, path};

#[tokio::test]
async fn test_connect_sends_key_authorization() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/session"))
        .and(header("Authorization", "Key test_api_key_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {"id": 1}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = VenomicsClient::connect(config_for(&mock_server)).await;
    assert!(client.is_ok());
}

#[tokio::test]
async fn test_connect_rejected_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/session"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let result = VenomicsClient::connect(config_for(&mock_server)).await;
    match result {
        Err(AppError::Auth(AuthError::Rejected { status, .. })) => assert_eq!(status, 401),
        other => panic!("Expected rejected credentials, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn test_connect_unreachable_host() {
    let config = ClientConfig::new("http://127.0.0.1:9", API_KEY);

    let result = VenomicsClient::connect(config).await;
    assert!(matches!(
        result,
        Err(AppError::Auth(AuthError::Unreachable { .. }))
    ));
}

#[tokio::test]
async fn test_get_non_200_is_endpoint_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/queries/7"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    match client.query(7).await {
        Err(AppError::Api(ApiError::Endpoint {
            method,
            path,
            status,
            message,
        })) => {
            assert_eq!(method, "GET");
            assert_eq!(path, "queries/7");
            assert_eq!(status, 404);
            assert_eq!(message, "Not found");
        }
        other => panic!("Expected endpoint error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_post_without_payload_sends_empty_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/queries/5/fork"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_json(6, "Copy of Signups")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let forked = client.fork_query(5).await.expect("fork failed");
    assert_eq!(forked.id, 6);
}

#[tokio::test]
async fn test_post_non_object_payload_sends_empty_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/queries/5"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(query_json(5, "Signups")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = Transport::new(&config_for(&mock_server)).expect("transport");
    let response = transport.post("queries/5", Some(&json!([1, 2, 3]))).await;
    assert!(response.is_ok());
}

#[tokio::test]
async fn test_post_201_is_endpoint_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/dashboards"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.create_dashboard("Ops").await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Api(ApiError::Endpoint { status: 201, .. })
    ));
}

#[tokio::test]
async fn test_delete_accepts_204() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/alerts/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.delete_alert(3).await.is_ok());
}

#[tokio::test]
async fn test_delete_rejects_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/alerts/3"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.delete_alert(3).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Api(ApiError::Endpoint { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/data_sources"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.data_sources().await.unwrap_err();
    assert!(matches!(err, AppError::Api(ApiError::Decode { .. })));
}
