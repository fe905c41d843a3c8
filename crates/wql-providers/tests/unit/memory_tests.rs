//! Tests for the in-memory and null warehouses

use std::sync::Arc;

use chrono::Utc;
use wql_domain::error::Error;
use wql_domain::ports::providers::{WarehouseConnection, WarehouseConnector};
use wql_domain::value_objects::{
    BackendRequest, Cell, Column, ColumnType, EndpointIdentity, QuerySpec, ResultTable, TableRef,
    TableStats,
};
use wql_providers::warehouse::{MemoryWarehouse, NullWarehouse};

fn endpoint() -> EndpointIdentity {
    EndpointIdentity::new("proj", "analytics", "US")
}

fn numbers(n: i64) -> ResultTable {
    ResultTable::new(
        vec![Column::new("n", ColumnType::Integer)],
        (1..=n).map(|i| vec![Cell::Int(i)]).collect(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_memory_serves_fixture_and_counts() {
    let warehouse = MemoryWarehouse::new().with_table("SELECT n FROM t", numbers(3));
    let connection = warehouse.connect(&endpoint()).await.unwrap();

    let table = connection
        .run_query(&BackendRequest::new("SELECT n FROM t"))
        .await
        .unwrap();

    assert_eq!(table.row_count(), 3);
    assert_eq!(warehouse.query_count(), 1);
    assert_eq!(warehouse.query_count_for("SELECT n FROM t"), 1);
    assert_eq!(warehouse.connect_count(), 1);
}

#[tokio::test]
async fn test_memory_applies_limit_to_base_fixture() {
    let warehouse = MemoryWarehouse::new().with_table("SELECT n FROM t", numbers(10));
    let connection = warehouse.connect(&endpoint()).await.unwrap();

    let request = QuerySpec::new("SELECT n FROM t").with_limit(4).to_request();
    let table = connection.run_query(&request).await.unwrap();

    assert_eq!(table.row_count(), 4);
    assert_eq!(table.value(3, "n"), Some(&Cell::Int(4)));
}

#[tokio::test]
async fn test_memory_error_and_unknown_query() {
    let warehouse = MemoryWarehouse::new().with_error("SELECT broken", "Syntax error");
    let connection = warehouse.connect(&endpoint()).await.unwrap();

    let err = connection
        .run_query(&BackendRequest::new("SELECT broken"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Syntax error"));

    let err = connection
        .run_query(&BackendRequest::new("SELECT nothing"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no fixture"));
}

#[tokio::test]
async fn test_memory_connect_failure_toggle() {
    let warehouse = MemoryWarehouse::new();
    warehouse.set_fail_connect(true);
    assert!(warehouse.connect(&endpoint()).await.is_err());

    warehouse.set_fail_connect(false);
    assert!(warehouse.connect(&endpoint()).await.is_ok());
    assert_eq!(warehouse.connect_count(), 2);
}

#[tokio::test]
async fn test_memory_catalog() {
    let stats = TableStats {
        num_rows: 5,
        num_bytes: 2048,
        created: Utc::now(),
        modified: Utc::now(),
        description: None,
    };
    let warehouse =
        MemoryWarehouse::new().with_table_stats("proj.analytics.orders", stats.clone());
    let connection = warehouse.connect(&endpoint()).await.unwrap();

    let found = connection
        .table_stats(&TableRef::new("proj", "analytics", "orders"))
        .await
        .unwrap();
    assert_eq!(found, stats);

    let missing = connection
        .table_stats(&TableRef::new("proj", "analytics", "nope"))
        .await
        .unwrap_err();
    assert!(matches!(missing, Error::NotFound { .. }));
}

#[tokio::test]
async fn test_clones_share_fixtures() {
    let warehouse = MemoryWarehouse::new();
    let connector: Arc<dyn WarehouseConnector> = Arc::new(warehouse.clone());
    warehouse.set_table("SELECT 1", numbers(1));

    let connection = connector.connect(&endpoint()).await.unwrap();
    assert!(connection.run_query(&BackendRequest::new("SELECT 1")).await.is_ok());
    assert_eq!(warehouse.query_count(), 1);
}

#[tokio::test]
async fn test_null_warehouse() {
    let connection = NullWarehouse::new().connect(&endpoint()).await.unwrap();

    let table = connection
        .run_query(&BackendRequest::new("SELECT anything"))
        .await
        .unwrap();
    assert!(table.is_empty());
    assert_eq!(table.column_count(), 0);

    let err = connection
        .table_stats(&TableRef::new("proj", "analytics", "t"))
        .await
        .unwrap_err();
    assert!(err.is_missing_resource());
}
