//! Shared helpers for the HTTP integration tests.
#![allow(dead_code)]

pub use serde_json::{Value, json};
pub use venomics_core::api::client::VenomicsClient;
pub use venomics_core::api::transport::{ClientConfig, Transport};
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test_api_key_123";

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new(server.uri(), API_KEY)
}

/// Client pointed at the mock server, without the session check.
pub fn client_for(server: &MockServer) -> VenomicsClient {
    VenomicsClient::unchecked(&config_for(server)).expect("client creation failed")
}

pub fn page(results: Value, page: u32, page_size: u32, count: u64) -> Value {
    json!({
        "results": results,
        "page": page,
        "page_size": page_size,
        "count": count
    })
}

pub fn query_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": null,
        "query": format!("select {}", id),
        "tags": [],
        "schedule": null,
        "latest_query_data_id": null
    })
}

pub fn job_json(id: &str, status: i64, query_result_id: Option<u64>) -> Value {
    json!({
        "job": {
            "id": id,
            "status": status,
            "query_result_id": query_result_id,
            "error": if status == 4 { json!("Query failed: syntax error") } else { Value::Null }
        }
    })
}
