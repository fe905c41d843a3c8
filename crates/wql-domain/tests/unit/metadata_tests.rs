//! Table Metadata Tests

use chrono::{TimeZone, Utc};
use wql_domain::constants::{NO_DESCRIPTION, TABLE_METADATA_KEYS};
use wql_domain::value_objects::{TableMetadata, TableStats, bytes_to_megabytes};

fn stats(description: Option<&str>) -> TableStats {
    TableStats {
        num_rows: 99_441,
        num_bytes: 1_572_864,
        created: Utc.with_ymd_and_hms(2023, 5, 1, 8, 0, 0).unwrap(),
        modified: Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap(),
        description: description.map(str::to_string),
    }
}

#[test]
fn test_megabytes_rounding() {
    assert_eq!(bytes_to_megabytes(0), 0.0);
    assert_eq!(bytes_to_megabytes(1_048_576), 1.0);
    assert_eq!(bytes_to_megabytes(1_572_864), 1.5);
    assert_eq!(bytes_to_megabytes(123_456_789), 117.74);
}

#[test]
fn test_from_stats() {
    let metadata = TableMetadata::from_stats(stats(Some("Order facts")));

    assert_eq!(metadata.num_rows, 99_441);
    assert_eq!(metadata.size_mb, 1.5);
    assert_eq!(metadata.description, "Order facts");
}

#[test]
fn test_missing_or_blank_description() {
    assert_eq!(TableMetadata::from_stats(stats(None)).description, NO_DESCRIPTION);
    assert_eq!(
        TableMetadata::from_stats(stats(Some("   "))).description,
        NO_DESCRIPTION
    );
}

#[test]
fn test_map_has_fixed_keys() {
    let map = TableMetadata::from_stats(stats(None)).to_map();

    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    let mut expected = TABLE_METADATA_KEYS.to_vec();
    keys.sort_unstable();
    expected.sort_unstable();
    assert_eq!(keys, expected);

    assert_eq!(map["num_rows"], serde_json::json!(99_441));
    assert_eq!(map["created"], serde_json::json!("2023-05-01T08:00:00+00:00"));
}
