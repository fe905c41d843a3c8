//! Null Warehouse Provider
//!
//! Connects successfully and answers every query with the empty table.
//! Every catalog lookup reports the table as not found.

use std::sync::Arc;

use async_trait::async_trait;

use wql_application::ports::registry::{
    WAREHOUSE_PROVIDERS, WarehouseProviderConfig, WarehouseProviderEntry,
};
use wql_domain::error::{Error, Result};
use wql_domain::ports::providers::{WarehouseConnection, WarehouseConnector};
use wql_domain::value_objects::{BackendRequest, EndpointIdentity, ResultTable, TableRef, TableStats};

/// Null warehouse connector
#[derive(Debug, Default, Clone, Copy)]
pub struct NullWarehouse;

impl NullWarehouse {
    /// Create a new null warehouse
    pub fn new() -> Self {
        Self
    }
}

/// Connection handle of [`NullWarehouse`]
pub struct NullConnection {
    endpoint: EndpointIdentity,
}

#[async_trait]
impl WarehouseConnection for NullConnection {
    async fn run_query(&self, _request: &BackendRequest) -> Result<ResultTable> {
        Ok(ResultTable::empty())
    }

    async fn table_stats(&self, table: &TableRef) -> Result<TableStats> {
        Err(Error::not_found(format!("table {table}")))
    }

    fn endpoint(&self) -> &EndpointIdentity {
        &self.endpoint
    }
}

#[async_trait]
impl WarehouseConnector for NullWarehouse {
    async fn connect(&self, endpoint: &EndpointIdentity) -> Result<Arc<dyn WarehouseConnection>> {
        Ok(Arc::new(NullConnection {
            endpoint: endpoint.clone(),
        }))
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

#[linkme::distributed_slice(WAREHOUSE_PROVIDERS)]
static NULL_PROVIDER: WarehouseProviderEntry = WarehouseProviderEntry {
    name: "null",
    description: "Null warehouse (every query returns the empty table)",
    factory: null_factory,
};

fn null_factory(
    _config: &WarehouseProviderConfig,
) -> std::result::Result<Arc<dyn WarehouseConnector>, String> {
    Ok(Arc::new(NullWarehouse::new()))
}
