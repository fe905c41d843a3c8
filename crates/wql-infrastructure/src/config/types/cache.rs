//! Cache configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};
use wql_application::use_cases::CacheTtls;
use wql_domain::constants::{CHARTS_TTL_SECS, DATA_QUERIES_TTL_SECS, TABLE_INFO_TTL_SECS};

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache enabled
    pub enabled: bool,

    /// TTL of general data queries
    pub data_queries_ttl_secs: u64,

    /// TTL of table metadata
    pub table_info_ttl_secs: u64,

    /// TTL of chart-level queries
    pub charts_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            data_queries_ttl_secs: DATA_QUERIES_TTL_SECS,
            table_info_ttl_secs: TABLE_INFO_TTL_SECS,
            charts_ttl_secs: CHARTS_TTL_SECS,
        }
    }
}

impl CacheConfig {
    /// TTLs per cache class
    pub fn ttls(&self) -> CacheTtls {
        CacheTtls {
            data_queries: Duration::from_secs(self.data_queries_ttl_secs),
            table_info: Duration::from_secs(self.table_info_ttl_secs),
            charts: Duration::from_secs(self.charts_ttl_secs),
        }
    }
}
