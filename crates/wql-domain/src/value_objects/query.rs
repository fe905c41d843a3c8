//! Query Request Value Objects
//!
//! [`QuerySpec`] is what callers hand to the executor; [`BackendRequest`] is
//! what the executor hands to a warehouse connection; [`CacheKey`] identifies
//! a memoized result.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::time::Duration;

use crate::constants::{CHARTS_TTL_SECS, DATA_QUERIES_TTL_SECS, TABLE_INFO_TTL_SECS};
use crate::value_objects::TableRef;

/// Freshness class of a cached result
///
/// Each class maps to its own configured time-to-live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheClass {
    /// General data queries
    #[default]
    DataQueries,
    /// Catalog metadata lookups
    TableInfo,
    /// Queries feeding a single chart
    Charts,
}

impl CacheClass {
    /// Built-in TTL of the class, used when no configuration overrides it
    pub fn default_ttl(self) -> Duration {
        Duration::from_secs(match self {
            Self::DataQueries => DATA_QUERIES_TTL_SECS,
            Self::TableInfo => TABLE_INFO_TTL_SECS,
            Self::Charts => CHARTS_TTL_SECS,
        })
    }

    /// Configuration name of the class
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DataQueries => "data_queries",
            Self::TableInfo => "table_info",
            Self::Charts => "charts",
        }
    }
}

/// Value Object: Query Specification
///
/// A fully-formed request for tabular data. Immutable once built.
///
/// ## Example
///
/// ```rust
/// use wql_domain::value_objects::{CacheClass, QuerySpec};
///
/// let spec = QuerySpec::new("SELECT * FROM orders")
///     .with_limit(10)
///     .with_cache_class(CacheClass::Charts);
/// assert_eq!(spec.request_text(), "SELECT * FROM orders LIMIT 10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuerySpec {
    text: String,
    limit: Option<u64>,
    #[serde(default)]
    cache_class: CacheClass,
}

impl QuerySpec {
    /// Create a spec for the given query text
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            limit: None,
            cache_class: CacheClass::default(),
        }
    }

    /// Cap the number of rows; a zero limit is treated as no limit
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }

    /// Select the freshness class
    pub fn with_cache_class(mut self, cache_class: CacheClass) -> Self {
        self.cache_class = cache_class;
        self
    }

    /// Query text as supplied
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Row limit, if any
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Freshness class
    pub fn cache_class(&self) -> CacheClass {
        self.cache_class
    }

    /// Text submitted to the backend, with the limit appended
    pub fn request_text(&self) -> String {
        match self.limit {
            Some(limit) => format!("{} LIMIT {limit}", self.text.trim_end()),
            None => self.text.clone(),
        }
    }

    /// Backend request for this spec
    pub fn to_request(&self) -> BackendRequest {
        BackendRequest {
            query: self.request_text(),
            row_cap: self.limit,
        }
    }

    /// Cache key for this spec
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::for_query(&self.text, self.limit)
    }
}

/// Request submitted to a warehouse connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendRequest {
    /// Final query text
    pub query: String,
    /// Optional cap on returned rows
    pub row_cap: Option<u64>,
}

impl BackendRequest {
    /// Request with no row cap
    pub fn new<S: Into<String>>(query: S) -> Self {
        Self {
            query: query.into(),
            row_cap: None,
        }
    }
}

/// Identity of a memoized result
///
/// Hex SHA-256 over the exact query text and limit, or over a table
/// reference for metadata lookups. The two families never collide because
/// each hashes a distinct leading tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a query text and optional limit
    pub fn for_query(text: &str, limit: Option<u64>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"query\0");
        hasher.update(text.as_bytes());
        hasher.update(b"\0");
        if let Some(limit) = limit {
            hasher.update(limit.to_be_bytes());
        }
        Self(hex::encode(hasher.finalize()))
    }

    /// Key for a catalog metadata lookup
    pub fn for_table(table: &TableRef) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"table\0");
        hasher.update(table.to_string().as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
