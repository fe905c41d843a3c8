//! Application use cases

pub mod analytics_tables;
pub mod diagnostics;
pub mod query_executor;

pub use analytics_tables::AnalyticsTables;
pub use diagnostics::{ConnectionDiagnostics, DiagnosticsOptions, DiagnosticsReport, TableCheck};
pub use query_executor::{CacheTtls, ExecutorCacheStats, QueryExecutor, QueryExecutorBuilder};
