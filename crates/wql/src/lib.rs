//! # Warehouse Query Layer
//!
//! Cache-aware execution of analytical SQL against a data warehouse.
//!
//! Callers ask for "the result of this query" and get a table back: the
//! connection is built lazily on first use, successful results are memoized
//! per TTL class, and every failure collapses to an empty result while an
//! operator notice records what went wrong.
//!
//! ## Example
//!
//! ```ignore
//! use wql::domain::value_objects::QuerySpec;
//! use wql::infrastructure::{ConfigLoader, build_executor};
//!
//! let config = ConfigLoader::new().load()?;
//! let executor = build_executor(&config)?;
//! let table = executor.execute(&QuerySpec::new("SELECT 1 AS x")).await;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Result tables, query specs, metadata, errors and ports
//! - `application` - The query executor, its cache, diagnostics and registries
//! - `providers` - BigQuery, in-memory and null warehouses; notifiers; clocks
//! - `infrastructure` - Configuration, logging and bootstrap wiring

/// Domain layer - core types and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use wql_domain::*;
}

/// Application layer - executor and use cases
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use wql_application::*;
}

/// Provider implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use wql_providers::*;
}

/// Infrastructure layer - config, logging, bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use wql_infrastructure::*;
}

/// Command line front end
pub mod cli;

// Re-export the types most callers need at the crate root
pub use application::use_cases::QueryExecutor;
pub use domain::value_objects::{QuerySpec, ResultTable, TableMetadata};
pub use infrastructure::{AppConfig, ConfigLoader, build_executor};
