//! Provider Constants
//!
//! Constants specific to provider implementations. These are separated from
//! domain constants (which live in wql-domain) and infrastructure constants.

// ============================================================================
// BIGQUERY PROVIDER CONSTANTS
// ============================================================================

/// BigQuery REST v2 base URL
pub const BIGQUERY_DEFAULT_BASE_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";

/// Environment variable holding an OAuth access token
pub const BIGQUERY_TOKEN_ENV_VAR: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Default per-request timeout in seconds
pub const BIGQUERY_DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default rows requested per result page
pub const BIGQUERY_DEFAULT_PAGE_SIZE: u32 = 10_000;

/// Server-side wait per `jobs.query` / `getQueryResults` call, in milliseconds
pub const BIGQUERY_JOB_WAIT_MS: u64 = 10_000;

/// Pause between polls of an incomplete job, in milliseconds
pub const BIGQUERY_POLL_INTERVAL_MS: u64 = 500;

/// Content type for JSON requests
pub const CONTENT_TYPE_JSON: &str = "application/json";

// ============================================================================
// NOTIFIER CONSTANTS
// ============================================================================

/// Default broadcast notifier capacity
pub const BROADCAST_DEFAULT_CAPACITY: usize = 256;
