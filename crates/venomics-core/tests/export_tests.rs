//! Bulk export against a mock server.

mod common;

use common::*;
use std::fs;
use tempfile::tempdir;
use venomics_core::core::services::export_service::QueryExporter;
use wiremock::matchers::{method, path};

#[tokio::test]
async fn test_export_writes_one_file_per_query() {
    let mock_server = MockServer::start().await;

    let mut detailed = query_json(1, "Signups");
    detailed["data_source_id"] = json!(2);
    detailed["user"] = json!({"id": 9, "name": "Ada"});
    detailed["updated_at"] = json!("2024-03-09T14:05:00.000Z");
    Mock::given(method("GET"))
        .and(path("/api/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            json!([detailed, query_json(2, "Churn")]),
            1,
            100,
            2,
        )))
        .mount(&mock_server)
        .await;

    let dir = tempdir().expect("Failed to create temp dir");
    let exporter = QueryExporter::new(dir.path());
    let client = client_for(&mock_server);

    let written = exporter.export(&client).await.expect("export failed");
    assert_eq!(written.len(), 2);

    let first = fs::read_to_string(dir.path().join("query_1.sql")).expect("missing export");
    assert_eq!(
        first,
        "/*\nName: Signups\nData source: 2\nCreated By: Ada\n\
         Last Updated At: 2024-03-09T14:05:00.000Z\n*/\nselect 1"
    );
    assert!(dir.path().join("query_2.sql").is_file());
}
