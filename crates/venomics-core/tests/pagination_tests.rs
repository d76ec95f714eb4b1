//! Integration tests for paginated listings over HTTP.

mod common;

use common::*;
use venomics_core::AppError;
use venomics_core::core::pagination::{PageRequest, paginate};
use venomics_core::error::{ApiError, PaginationError};
use wiremock::matchers::{method, path, query_param};

#[tokio::test]
async fn test_all_queries_walks_every_page_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/queries"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([query_json(1, "a"), query_json(2, "b")]),
            1,
            2,
            5,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/queries"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([query_json(3, "c"), query_json(4, "d")]),
            2,
            2,
            5,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/queries"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([query_json(5, "e")]),
            3,
            2,
            5,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        VenomicsClient::unchecked(&config_for(&mock_server).with_page_size(2)).expect("client");
    let queries = client.all_queries().await.expect("pagination failed");

    let ids: Vec<u64> = queries.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_server_capped_page_size_is_walked_to_the_end() {
    let mock_server = MockServer::start().await;

    // Client asks for 100 per page, server only hands out 2
    for (number, results) in [
        (1, json!([query_json(1, "a"), query_json(2, "b")])),
        (2, json!([query_json(3, "c"), query_json(4, "d")])),
        (3, json!([query_json(5, "e")])),
    ] {
        Mock::given(method("GET"))
            .and(path("/api/queries"))
            .and(query_param("page", number.to_string()))
            .and(query_param("page_size", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(results, number, 2, 5)))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = client_for(&mock_server);
    let queries = client.all_queries().await.expect("pagination failed");

    let ids: Vec<u64> = queries.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_page_number_that_does_not_advance_is_reported() {
    let mock_server = MockServer::start().await;

    // Always echoes page 1
    Mock::given(method("GET"))
        .and(path("/api/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([query_json(1, "a")]),
            1,
            1,
            4,
        )))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.all_queries().await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Pagination(PaginationError::StalePage {
            requested: 2,
            returned: 1
        })
    ));
}

#[tokio::test]
async fn test_empty_collection_is_single_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]), 1, 100, 0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let dashboards = client.all_dashboards().await.expect("pagination failed");
    assert!(dashboards.is_empty());
}

#[tokio::test]
async fn test_failing_page_discards_everything() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/queries"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([query_json(1, "a")]),
            1,
            1,
            2,
        )))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/queries"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client =
        VenomicsClient::unchecked(&config_for(&mock_server).with_page_size(1)).expect("client");
    let err = client.all_queries().await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Api(ApiError::Endpoint { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_stuck_server_is_reported() {
    let mock_server = MockServer::start().await;

    // Claims more items but never returns any
    Mock::given(method("GET"))
        .and(path("/api/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]), 1, 10, 30)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let client = &client;
    let err = paginate(
        move |page| client.queries(page, false),
        PageRequest::new(1, 10),
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        AppError::Pagination(PaginationError::NoProgress { page: 1, .. })
    ));
}

#[tokio::test]
async fn test_disabled_users_filter_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("disabled", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([{"id": 4, "name": "Old account", "email": "old@example.test", "is_disabled": true}]),
            1,
            100,
            1,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let users = client.all_users(true).await.expect("users failed");
    assert_eq!(users.len(), 1);
    assert!(users[0].is_disabled);
}
