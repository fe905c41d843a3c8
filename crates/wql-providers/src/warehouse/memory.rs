//! In-Memory Warehouse Provider
//!
//! Fixture backend for tests and offline demos. Canned tables and errors
//! are registered by request text; catalog statistics by qualified table
//! name. Counters expose how many round-trips and connects happened.
//!
//! A request carrying a row cap first looks for a fixture under its exact
//! text and then under the text without the trailing ` LIMIT n`; in the
//! second case the fixture rows are truncated to the cap.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use wql_application::ports::registry::{
    WAREHOUSE_PROVIDERS, WarehouseProviderConfig, WarehouseProviderEntry,
};
use wql_domain::error::{Error, Result};
use wql_domain::ports::providers::{WarehouseConnection, WarehouseConnector};
use wql_domain::value_objects::{BackendRequest, EndpointIdentity, ResultTable, TableRef, TableStats};

#[derive(Debug, Clone)]
enum Fixture {
    Table(ResultTable),
    Error(String),
}

#[derive(Debug, Default)]
struct MemoryState {
    fixtures: DashMap<String, Fixture>,
    catalog: DashMap<String, TableStats>,
    denied: DashMap<String, ()>,
    query_counts: DashMap<String, u64>,
    queries: AtomicU64,
    catalog_lookups: AtomicU64,
    connects: AtomicU64,
    fail_connect: AtomicBool,
    latency_ms: AtomicU64,
}

impl MemoryState {
    fn lookup(&self, request: &BackendRequest) -> Option<Fixture> {
        if let Some(fixture) = self.fixtures.get(&request.query) {
            return Some(fixture.clone());
        }
        let cap = request.row_cap?;
        let base = request.query.strip_suffix(&format!(" LIMIT {cap}"))?;
        let fixture = self.fixtures.get(base)?.clone();
        Some(match fixture {
            Fixture::Table(table) => Fixture::Table(truncate(table, cap)),
            other => other,
        })
    }
}

fn truncate(table: ResultTable, cap: u64) -> ResultTable {
    let cap = usize::try_from(cap).unwrap_or(usize::MAX);
    if table.row_count() <= cap {
        return table;
    }
    let (columns, mut rows) = table.into_parts();
    rows.truncate(cap);
    // Truncating keeps every row's width, so this cannot fail.
    ResultTable::new(columns, rows).unwrap_or_default()
}

/// In-memory warehouse connector
///
/// Cloning shares the fixtures and counters, so a test can keep a handle
/// after passing the connector to an executor.
#[derive(Debug, Clone, Default)]
pub struct MemoryWarehouse {
    state: Arc<MemoryState>,
}

impl MemoryWarehouse {
    /// Create an empty warehouse
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a result table for a request text
    pub fn with_table(self, query: impl Into<String>, table: ResultTable) -> Self {
        self.set_table(query, table);
        self
    }

    /// Register a failure for a request text
    pub fn with_error(self, query: impl Into<String>, message: impl Into<String>) -> Self {
        self.set_error(query, message);
        self
    }

    /// Register catalog statistics for a qualified `project.dataset.table` name
    pub fn with_table_stats(self, table: impl Into<String>, stats: TableStats) -> Self {
        self.state.catalog.insert(table.into(), stats);
        self
    }

    /// Make catalog lookups of a qualified table name fail with a permission error
    pub fn with_denied_table(self, table: impl Into<String>) -> Self {
        self.state.denied.insert(table.into(), ());
        self
    }

    /// Delay every round-trip by `latency`
    pub fn with_latency(self, latency: Duration) -> Self {
        let millis = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self.state.latency_ms.store(millis, Ordering::SeqCst);
        self
    }

    /// Replace the fixture of a request text with a table
    pub fn set_table(&self, query: impl Into<String>, table: ResultTable) {
        self.state.fixtures.insert(query.into(), Fixture::Table(table));
    }

    /// Replace the fixture of a request text with a failure
    pub fn set_error(&self, query: impl Into<String>, message: impl Into<String>) {
        self.state
            .fixtures
            .insert(query.into(), Fixture::Error(message.into()));
    }

    /// Make subsequent connects fail (or succeed again)
    pub fn set_fail_connect(&self, fail: bool) {
        self.state.fail_connect.store(fail, Ordering::SeqCst);
    }

    /// Total query round-trips
    pub fn query_count(&self) -> u64 {
        self.state.queries.load(Ordering::SeqCst)
    }

    /// Round-trips for one request text
    pub fn query_count_for(&self, query: &str) -> u64 {
        self.state.query_counts.get(query).map_or(0, |c| *c)
    }

    /// Catalog lookups so far
    pub fn catalog_lookups(&self) -> u64 {
        self.state.catalog_lookups.load(Ordering::SeqCst)
    }

    /// Connection handles built so far
    pub fn connect_count(&self) -> u64 {
        self.state.connects.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        let millis = self.state.latency_ms.load(Ordering::SeqCst);
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}

/// Connection handle over a [`MemoryWarehouse`]
pub struct MemoryConnection {
    warehouse: MemoryWarehouse,
    endpoint: EndpointIdentity,
}

#[async_trait]
impl WarehouseConnection for MemoryConnection {
    async fn run_query(&self, request: &BackendRequest) -> Result<ResultTable> {
        let state = &self.warehouse.state;
        state.queries.fetch_add(1, Ordering::SeqCst);
        *state
            .query_counts
            .entry(request.query.clone())
            .or_insert(0) += 1;
        self.warehouse.simulate_latency().await;

        match state.lookup(request) {
            Some(Fixture::Table(table)) => {
                debug!(rows = table.row_count(), "memory warehouse served fixture");
                Ok(table)
            }
            Some(Fixture::Error(message)) => Err(Error::warehouse(message)),
            None => Err(Error::warehouse(format!(
                "no fixture registered for query: {}",
                request.query
            ))),
        }
    }

    async fn table_stats(&self, table: &TableRef) -> Result<TableStats> {
        let state = &self.warehouse.state;
        state.catalog_lookups.fetch_add(1, Ordering::SeqCst);
        self.warehouse.simulate_latency().await;
        let name = table.to_string();
        if state.denied.contains_key(&name) {
            return Err(Error::permission_denied(name, "Access Denied"));
        }
        state
            .catalog
            .get(&name)
            .map(|stats| stats.clone())
            .ok_or_else(|| Error::not_found(format!("table {table}")))
    }

    fn endpoint(&self) -> &EndpointIdentity {
        &self.endpoint
    }
}

#[async_trait]
impl WarehouseConnector for MemoryWarehouse {
    async fn connect(&self, endpoint: &EndpointIdentity) -> Result<Arc<dyn WarehouseConnection>> {
        self.state.connects.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        if self.state.fail_connect.load(Ordering::SeqCst) {
            return Err(Error::authentication("memory warehouse rejected credentials"));
        }
        Ok(Arc::new(MemoryConnection {
            warehouse: self.clone(),
            endpoint: endpoint.clone(),
        }))
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(WAREHOUSE_PROVIDERS)]
static MEMORY_PROVIDER: WarehouseProviderEntry = WarehouseProviderEntry {
    name: "memory",
    description: "In-memory fixture warehouse (testing, offline demos)",
    factory: memory_factory,
};

fn memory_factory(
    _config: &WarehouseProviderConfig,
) -> std::result::Result<Arc<dyn WarehouseConnector>, String> {
    Ok(Arc::new(MemoryWarehouse::new()))
}
