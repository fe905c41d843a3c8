//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `wql_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "wql.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "wql";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "WQL";

/// Separator between the prefix and nested keys of configuration env vars
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// WAREHOUSE CONSTANTS
// ============================================================================

/// Default warehouse provider
pub const DEFAULT_WAREHOUSE_PROVIDER: &str = "bigquery";

/// Default processing location
pub const DEFAULT_WAREHOUSE_LOCATION: &str = "US";

/// Default per-request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default rows requested per result page
pub const DEFAULT_MAX_RESULTS_PER_PAGE: u32 = 10_000;

/// Providers that need no project or dataset
pub const OFFLINE_WAREHOUSE_PROVIDERS: [&str; 2] = ["memory", "null"];

// ============================================================================
// NOTIFIER CONSTANTS
// ============================================================================

/// Default operator notifier
pub const DEFAULT_NOTIFIER_PROVIDER: &str = "log";

/// Default capacity of the broadcast notifier channel
pub const DEFAULT_NOTIFIER_CAPACITY: usize = 256;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV_VAR: &str = "WQL_LOG";

/// File stem used when the log file path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "wql";

// ============================================================================
// ANALYTICS TABLE DEFAULTS
// ============================================================================

/// Default logical domain to physical table mapping
pub const DEFAULT_ANALYTICS_TABLES: [(&str, &str); 7] = [
    ("revenue", "revenue_analytics_obt"),
    ("customer", "customer_analytics_obt"),
    ("seller", "seller_analytics_obt"),
    ("payment", "payment_analytics_obt"),
    ("geographic", "geographic_analytics_obt"),
    ("delivery", "delivery_analytics_obt"),
    ("orders", "orders_analytics_obt"),
];
