//! Warehouse Provider Port
//!
//! Port for analytical backends. A [`WarehouseConnector`] builds connection
//! handles; a [`WarehouseConnection`] is the live, reusable handle that runs
//! queries and answers catalog lookups.
//!
//! ## Provider Pattern
//!
//! Connectors are created from configuration through the provider registry
//! and are cheap to hold. Connecting is the expensive, fallible step and is
//! done lazily by the executor.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::{BackendRequest, EndpointIdentity, ResultTable, TableRef, TableStats};

/// Live handle to an analytical backend
///
/// Implementations must be `Send + Sync`; one handle is shared by every
/// caller of an executor for the life of the process.
#[async_trait]
pub trait WarehouseConnection: Send + Sync {
    /// Submit a query and materialize the full response
    async fn run_query(&self, request: &BackendRequest) -> Result<ResultTable>;

    /// Read catalog statistics for a table
    ///
    /// Returns `Error::NotFound` or `Error::PermissionDenied` when the table
    /// does not exist or is hidden from the caller.
    async fn table_stats(&self, table: &TableRef) -> Result<TableStats>;

    /// Endpoint this handle is bound to
    fn endpoint(&self) -> &EndpointIdentity;
}

/// Factory for warehouse connection handles
///
/// # Example
///
/// ```ignore
/// use wql_domain::ports::providers::WarehouseConnector;
///
/// let connection = connector.connect(&endpoint).await?;
/// let table = connection.run_query(&BackendRequest::new("SELECT 1 AS x")).await?;
/// ```
#[async_trait]
pub trait WarehouseConnector: Send + Sync {
    /// Construct a connection handle for the given endpoint
    async fn connect(&self, endpoint: &EndpointIdentity) -> Result<Arc<dyn WarehouseConnection>>;

    /// Get the name/identifier of this provider implementation
    ///
    /// # Returns
    /// A string identifier for the provider (e.g., "bigquery", "memory", "null")
    fn provider_name(&self) -> &str;
}
