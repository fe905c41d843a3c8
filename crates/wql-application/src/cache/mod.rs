//! Result caching with TTL
//!
//! The cache is an explicit dependency of the executor: constructed with
//! it, reachable only through its methods, and fresh for every test.

pub mod query_cache;

pub use query_cache::{CacheEntry, CacheStats, QueryCache};
