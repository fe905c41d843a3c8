//! Table Metadata Value Objects
//!
//! [`TableStats`] is the raw catalog answer; [`TableMetadata`] is the
//! fixed-shape view handed to the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{BYTES_PER_MEGABYTE, NO_DESCRIPTION};

/// Raw catalog statistics for a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStats {
    /// Number of rows
    pub num_rows: u64,
    /// Storage size in bytes
    pub num_bytes: u64,
    /// Creation time
    pub created: DateTime<Utc>,
    /// Last modification time
    pub modified: DateTime<Utc>,
    /// Free-form description, if the table has one
    pub description: Option<String>,
}

/// Value Object: Table Metadata
///
/// ## Business Rules
///
/// - Size is reported in megabytes: bytes / 1 048 576, rounded to 2 decimals
/// - A missing or blank description becomes "No description available"
/// - The map form always has exactly the keys in
///   [`TABLE_METADATA_KEYS`](crate::constants::TABLE_METADATA_KEYS)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Number of rows
    pub num_rows: u64,
    /// Storage size in megabytes
    pub size_mb: f64,
    /// Creation time
    pub created: DateTime<Utc>,
    /// Last modification time
    pub modified: DateTime<Utc>,
    /// Description
    pub description: String,
}

impl TableMetadata {
    /// Map raw statistics into the presentation view
    pub fn from_stats(stats: TableStats) -> Self {
        let description = stats
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());
        Self {
            num_rows: stats.num_rows,
            size_mb: bytes_to_megabytes(stats.num_bytes),
            created: stats.created,
            modified: stats.modified,
            description,
        }
    }

    /// Key/value view with the fixed key set
    pub fn to_map(&self) -> BTreeMap<String, serde_json::Value> {
        let mut map = BTreeMap::new();
        map.insert("num_rows".to_string(), serde_json::json!(self.num_rows));
        map.insert("size_mb".to_string(), serde_json::json!(self.size_mb));
        map.insert(
            "created".to_string(),
            serde_json::json!(self.created.to_rfc3339()),
        );
        map.insert(
            "modified".to_string(),
            serde_json::json!(self.modified.to_rfc3339()),
        );
        map.insert(
            "description".to_string(),
            serde_json::json!(self.description),
        );
        map
    }
}

/// Convert a byte count to megabytes rounded to two decimals
#[allow(clippy::cast_precision_loss)]
pub fn bytes_to_megabytes(bytes: u64) -> f64 {
    ((bytes as f64 / BYTES_PER_MEGABYTE) * 100.0).round() / 100.0
}
