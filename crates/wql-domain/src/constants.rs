//! Domain layer constants
//!
//! Contains constants that are part of the domain contract and are used by
//! the application layer. Infrastructure-specific constants remain in
//! `wql_infrastructure::constants`.

// ============================================================================
// CACHE DOMAIN CONSTANTS
// ============================================================================

/// Default TTL for data query results (1 hour)
pub const DATA_QUERIES_TTL_SECS: u64 = 3600;

/// Default TTL for table metadata (2 hours)
pub const TABLE_INFO_TTL_SECS: u64 = 7200;

/// Default TTL for chart-level query results (30 minutes)
pub const CHARTS_TTL_SECS: u64 = 1800;

// ============================================================================
// METADATA DOMAIN CONSTANTS
// ============================================================================

/// Conversion factor from raw byte counts to the reported megabytes
pub const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Description reported for tables the catalog has no description for
pub const NO_DESCRIPTION: &str = "No description available";

/// Keys of a non-empty table metadata mapping, in presentation order
pub const TABLE_METADATA_KEYS: [&str; 5] = ["num_rows", "size_mb", "created", "modified", "description"];

// ============================================================================
// NOTIFICATION CONSTANTS
// ============================================================================

/// Maximum characters of query text carried in an operator notice
pub const QUERY_PREVIEW_CHARS: usize = 120;
