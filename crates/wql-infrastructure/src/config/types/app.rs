//! Main application configuration

use serde::{Deserialize, Serialize};

use super::{CacheConfig, LoggingConfig, NotifierConfig, TablesConfig, WarehouseConfig};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Warehouse endpoint and provider
    #[serde(default)]
    pub warehouse: WarehouseConfig,
    /// Logical domain to physical table mapping
    #[serde(default)]
    pub tables: TablesConfig,
    /// Result memoization
    #[serde(default)]
    pub cache: CacheConfig,
    /// Operator notification channel
    #[serde(default)]
    pub notifier: NotifierConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}
