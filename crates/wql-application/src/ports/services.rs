//! Application Service Port Interfaces
//!
//! Contracts the presentation layer depends on. Implementations never
//! surface errors through these methods; failures degrade to empty values.

use std::sync::Arc;

use async_trait::async_trait;
use wql_domain::value_objects::{QuerySpec, ResultTable, TableMetadata};

// ============================================================================
// Query Service Interface
// ============================================================================

/// Query Service Interface
///
/// "Run this query and give me a table."
#[async_trait]
pub trait QueryServiceInterface: Send + Sync {
    /// Execute a query; any failure yields the empty table
    async fn execute(&self, spec: &QuerySpec) -> Arc<ResultTable>;

    /// Catalog metadata for a table; `None` when it cannot be read
    async fn get_table_metadata(&self, table: &str) -> Option<TableMetadata>;
}
