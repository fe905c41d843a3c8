//! Clock Port
//!
//! Source of "now" for cache freshness decisions. Injected so that tests can
//! advance time deterministically instead of sleeping.

use chrono::{DateTime, Utc};

/// Source of the current instant
pub trait Clock: Send + Sync {
    /// Current time in UTC
    fn now(&self) -> DateTime<Utc>;
}
