//! Tests for the BigQuery REST provider
//!
//! Decoding is tested directly; request flows run against a mockito server.

use chrono::{TimeZone, Utc};
use mockito::{Matcher, Server};
use reqwest::Client;
use serde_json::json;
use wql_domain::error::Error;
use wql_domain::ports::providers::{WarehouseConnection, WarehouseConnector};
use wql_domain::value_objects::{BackendRequest, Cell, Column, ColumnType, EndpointIdentity, TableRef};
use wql_providers::constants::BIGQUERY_TOKEN_ENV_VAR;
use wql_providers::warehouse::bigquery::{
    BigQueryConnector, FieldSchema, TableResource, column_type, decode_cell, decode_table_stats,
    parse_timestamp,
};

fn endpoint() -> EndpointIdentity {
    EndpointIdentity::new("proj", "analytics", "US")
}

fn connector(base_url: String) -> BigQueryConnector {
    BigQueryConnector::new(Some("test-token".to_string()), Some(base_url), 2, Client::new())
}

fn field(field_type: &str, mode: Option<&str>) -> FieldSchema {
    FieldSchema {
        name: "c".to_string(),
        field_type: field_type.to_string(),
        mode: mode.map(str::to_string),
    }
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_column_types() {
    assert_eq!(column_type(&field("INT64", None)), ColumnType::Integer);
    assert_eq!(column_type(&field("NUMERIC", None)), ColumnType::Float);
    assert_eq!(column_type(&field("BOOL", None)), ColumnType::Boolean);
    assert_eq!(column_type(&field("TIMESTAMP", None)), ColumnType::Timestamp);
    assert_eq!(column_type(&field("DATE", None)), ColumnType::String);
    assert_eq!(column_type(&field("RECORD", None)), ColumnType::Record);
    assert_eq!(column_type(&field("STRING", Some("REPEATED"))), ColumnType::Record);
}

#[test]
fn test_timestamp_in_e_notation() {
    let ts = parse_timestamp("1.6094592E9").unwrap();
    assert_eq!(ts, Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());
}

#[test]
fn test_decode_scalar_cells() {
    let int = Column::new("n", ColumnType::Integer);
    let float = Column::new("x", ColumnType::Float);
    let flag = Column::new("b", ColumnType::Boolean);
    let text = Column::new("s", ColumnType::String);

    assert_eq!(decode_cell(&int, &json!("42")).unwrap(), Cell::Int(42));
    assert_eq!(decode_cell(&float, &json!("2.5")).unwrap(), Cell::Float(2.5));
    assert_eq!(decode_cell(&flag, &json!("true")).unwrap(), Cell::Bool(true));
    assert_eq!(decode_cell(&text, &json!("sp")).unwrap(), Cell::String("sp".into()));
    assert_eq!(decode_cell(&int, &json!(null)).unwrap(), Cell::Null);
}

#[test]
fn test_decode_rejects_malformed_integer() {
    let int = Column::new("n", ColumnType::Integer);
    let err = decode_cell(&int, &json!("forty-two")).unwrap_err();
    assert!(matches!(err, Error::Warehouse { .. }));
}

#[test]
fn test_decode_table_stats() {
    let resource: TableResource = serde_json::from_value(json!({
        "numRows": "99441",
        "numBytes": "5242880",
        "creationTime": "1609459200000",
        "lastModifiedTime": "1612137600000",
    }))
    .unwrap();
    let stats = decode_table_stats(&resource).unwrap();
    assert_eq!(stats.num_rows, 99_441);
    assert_eq!(stats.num_bytes, 5_242_880);
    assert_eq!(stats.created, Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(stats.description, None);
}

// ============================================================================
// Connector
// ============================================================================

#[tokio::test]
async fn test_connect_requires_project() {
    let connector = connector("http://localhost:1".to_string());
    let err = connector
        .connect(&EndpointIdentity::new("", "analytics", "US"))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[tokio::test]
async fn test_connect_requires_token() {
    // SAFETY: only this test reads the variable through a token-less connector
    unsafe { std::env::remove_var(BIGQUERY_TOKEN_ENV_VAR) };
    let connector = BigQueryConnector::new(None, None, 100, Client::new());
    let err = connector.connect(&endpoint()).await.err().unwrap();
    assert!(matches!(err, Error::Authentication { .. }));
}

#[tokio::test]
async fn test_connect_binds_endpoint() {
    let connection = connector("http://localhost:1".to_string())
        .connect(&endpoint())
        .await
        .unwrap();
    assert_eq!(connection.endpoint(), &endpoint());
}

// ============================================================================
// Query flows
// ============================================================================

#[tokio::test]
async fn test_run_query_follows_page_tokens() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("POST", "/projects/proj/queries")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::PartialJson(json!({
            "query": "SELECT state, n FROM t",
            "useLegacySql": false,
            "location": "US",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "jobComplete": true,
                "jobReference": {"jobId": "job-1", "location": "US"},
                "schema": {"fields": [
                    {"name": "state", "type": "STRING"},
                    {"name": "n", "type": "INTEGER"}
                ]},
                "rows": [
                    {"f": [{"v": "SP"}, {"v": "10"}]},
                    {"f": [{"v": "RJ"}, {"v": "7"}]}
                ],
                "pageToken": "p2"
            })
            .to_string(),
        )
        .create_async()
        .await;
    let second = server
        .mock("GET", "/projects/proj/queries/job-1")
        .match_query(Matcher::UrlEncoded("pageToken".into(), "p2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "jobComplete": true,
                "jobReference": {"jobId": "job-1", "location": "US"},
                "rows": [{"f": [{"v": "MG"}, {"v": null}]}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let connection = connector(server.url()).connect(&endpoint()).await.unwrap();
    let table = connection
        .run_query(&BackendRequest::new("SELECT state, n FROM t"))
        .await
        .unwrap();

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.value(0, "n"), Some(&Cell::Int(10)));
    assert_eq!(table.value(2, "state"), Some(&Cell::String("MG".into())));
    assert_eq!(table.value(2, "n"), Some(&Cell::Null));
}

#[tokio::test]
async fn test_run_query_stops_at_row_cap() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/projects/proj/queries")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "jobComplete": true,
                "jobReference": {"jobId": "job-2"},
                "schema": {"fields": [{"name": "n", "type": "INT64"}]},
                "rows": [{"f": [{"v": "1"}]}, {"f": [{"v": "2"}]}],
                "pageToken": "more"
            })
            .to_string(),
        )
        .create_async()
        .await;
    let next_page = server
        .mock("GET", Matcher::Any)
        .with_status(500)
        .expect(0)
        .create_async()
        .await;

    let connection = connector(server.url()).connect(&endpoint()).await.unwrap();
    let request = BackendRequest {
        query: "SELECT n FROM t LIMIT 2".to_string(),
        row_cap: Some(2),
    };
    let table = connection.run_query(&request).await.unwrap();

    assert_eq!(table.row_count(), 2);
    next_page.assert_async().await;
}

#[tokio::test]
async fn test_run_query_polls_incomplete_job() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/projects/proj/queries")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"jobComplete": false, "jobReference": {"jobId": "slow", "location": "US"}})
                .to_string(),
        )
        .create_async()
        .await;
    let poll = server
        .mock("GET", "/projects/proj/queries/slow")
        .match_query(Matcher::UrlEncoded("location".into(), "US".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "jobComplete": true,
                "jobReference": {"jobId": "slow", "location": "US"},
                "schema": {"fields": [{"name": "ok", "type": "BOOLEAN"}]},
                "rows": [{"f": [{"v": "true"}]}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let connection = connector(server.url()).connect(&endpoint()).await.unwrap();
    let table = connection
        .run_query(&BackendRequest::new("SELECT TRUE AS ok"))
        .await
        .unwrap();

    poll.assert_async().await;
    assert_eq!(table.value(0, "ok"), Some(&Cell::Bool(true)));
}

#[tokio::test]
async fn test_run_query_surfaces_api_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/projects/proj/queries")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"code":400,"message":"Syntax error: Unexpected keyword"}}"#)
        .create_async()
        .await;

    let connection = connector(server.url()).connect(&endpoint()).await.unwrap();
    let err = connection
        .run_query(&BackendRequest::new("SELEC 1"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Syntax error"));
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_table_stats_reads_catalog() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/projects/proj/datasets/analytics/tables/orders_analytics_obt")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "numRows": "1000",
                "numBytes": "1048576",
                "creationTime": "1609459200000",
                "lastModifiedTime": "1609459200000",
                "description": "Order grain"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let connection = connector(server.url()).connect(&endpoint()).await.unwrap();
    let stats = connection
        .table_stats(&TableRef::new("proj", "analytics", "orders_analytics_obt"))
        .await
        .unwrap();

    assert_eq!(stats.num_rows, 1000);
    assert_eq!(stats.num_bytes, 1_048_576);
    assert_eq!(stats.description.as_deref(), Some("Order grain"));
}

#[tokio::test]
async fn test_table_stats_not_found_and_forbidden() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/projects/proj/datasets/analytics/tables/missing")
        .with_status(404)
        .with_body(r#"{"error":{"code":404,"message":"Not found: Table proj:analytics.missing"}}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/projects/proj/datasets/analytics/tables/secret")
        .with_status(403)
        .with_body(r#"{"error":{"code":403,"message":"Access Denied"}}"#)
        .create_async()
        .await;

    let connection = connector(server.url()).connect(&endpoint()).await.unwrap();
    let missing = connection
        .table_stats(&TableRef::new("proj", "analytics", "missing"))
        .await
        .unwrap_err();
    let secret = connection
        .table_stats(&TableRef::new("proj", "analytics", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(missing, Error::NotFound { .. }));
    assert!(matches!(secret, Error::PermissionDenied { .. }));
}
