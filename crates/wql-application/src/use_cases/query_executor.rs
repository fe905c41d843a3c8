//! Query Executor Use Case
//!
//! The single entry point the presentation layer talks to: "run this query
//! and give me a table". Hides lazy connection setup, memoizes successful
//! results per TTL class, and collapses every failure into an empty result
//! plus an operator notice.
//!
//! ## Failure policy
//!
//! | Operation | Failure | Caller sees |
//! |-----------|---------|-------------|
//! | `get_connection` | handle construction failed | `None` |
//! | `execute` | connection or execution failure | empty [`ResultTable`] |
//! | `get_table_metadata` | connection, not found, permission | `None` |
//!
//! Each failed backend attempt emits exactly one [`OperatorNotice`], raised
//! by the caller that ran it. Callers that were waiting on the same attempt
//! get the same failure without a second notice. The strict `try_*`
//! variants return the typed [`QueryFailure`] instead and notify in the
//! same way.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info, instrument, warn};
use wql_domain::error::QueryFailure;
use wql_domain::events::{OperatorNotice, query_preview};
use wql_domain::ports::infrastructure::{Clock, OperatorNotifier};
use wql_domain::ports::providers::{WarehouseConnection, WarehouseConnector};
use wql_domain::value_objects::{
    CacheClass, CacheKey, EndpointIdentity, QuerySpec, ResultTable, TableMetadata, TableRef,
};

use crate::cache::{CacheEntry, CacheStats, QueryCache};
use crate::ports::services::QueryServiceInterface;
use crate::use_cases::analytics_tables::AnalyticsTables;

/// Time-to-live per cache class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    /// TTL of general data queries
    pub data_queries: Duration,
    /// TTL of catalog metadata
    pub table_info: Duration,
    /// TTL of chart-level queries
    pub charts: Duration,
}

impl CacheTtls {
    /// TTL for a class
    pub fn for_class(&self, class: CacheClass) -> Duration {
        match class {
            CacheClass::DataQueries => self.data_queries,
            CacheClass::TableInfo => self.table_info,
            CacheClass::Charts => self.charts,
        }
    }
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            data_queries: CacheClass::DataQueries.default_ttl(),
            table_info: CacheClass::TableInfo.default_ttl(),
            charts: CacheClass::Charts.default_ttl(),
        }
    }
}

/// Cache statistics of both executor caches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutorCacheStats {
    /// Query result cache
    pub queries: CacheStats,
    /// Table metadata cache
    pub metadata: CacheStats,
}

/// Outcome of the latest connection attempt
#[derive(Debug, Default)]
struct ConnectGate {
    attempts: u64,
    failure: Option<QueryFailure>,
}

/// A failed connection attempt as seen by one caller
struct ConnectFailure {
    failure: QueryFailure,
    /// Whether this caller ran the attempt, as opposed to waiting on it
    ran: bool,
}

/// Builder for [`QueryExecutor`]
pub struct QueryExecutorBuilder {
    connector: Arc<dyn WarehouseConnector>,
    endpoint: EndpointIdentity,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn OperatorNotifier>,
    ttls: CacheTtls,
    cache_enabled: bool,
    tables: AnalyticsTables,
}

impl QueryExecutorBuilder {
    /// Override the TTLs
    pub fn with_ttls(mut self, ttls: CacheTtls) -> Self {
        self.ttls = ttls;
        self
    }

    /// Enable or disable memoization
    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Set the analytics table catalog
    pub fn with_tables(mut self, tables: AnalyticsTables) -> Self {
        self.tables = tables;
        self
    }

    /// Build the executor; no connection is attempted here
    pub fn build(self) -> QueryExecutor {
        QueryExecutor {
            tables_cache: QueryCache::new(Arc::clone(&self.clock)).with_enabled(self.cache_enabled),
            metadata_cache: QueryCache::new(Arc::clone(&self.clock))
                .with_enabled(self.cache_enabled),
            connection: OnceCell::new(),
            connect_gate: Mutex::new(ConnectGate::default()),
            connect_attempts: AtomicU64::new(0),
            connector: self.connector,
            endpoint: self.endpoint,
            clock: self.clock,
            notifier: self.notifier,
            ttls: self.ttls,
            tables: self.tables,
        }
    }
}

/// Query Cache & Executor
///
/// Owns the lazily-constructed connection handle and both caches. Shared as
/// `Arc<QueryExecutor>`; every method takes `&self`.
pub struct QueryExecutor {
    connector: Arc<dyn WarehouseConnector>,
    endpoint: EndpointIdentity,
    connection: OnceCell<Arc<dyn WarehouseConnection>>,
    connect_gate: Mutex<ConnectGate>,
    connect_attempts: AtomicU64,
    tables_cache: QueryCache<Arc<ResultTable>>,
    metadata_cache: QueryCache<TableMetadata>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn OperatorNotifier>,
    ttls: CacheTtls,
    tables: AnalyticsTables,
}

impl QueryExecutor {
    /// Start building an executor
    pub fn builder(
        connector: Arc<dyn WarehouseConnector>,
        endpoint: EndpointIdentity,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn OperatorNotifier>,
    ) -> QueryExecutorBuilder {
        QueryExecutorBuilder {
            connector,
            endpoint,
            clock,
            notifier,
            ttls: CacheTtls::default(),
            cache_enabled: true,
            tables: AnalyticsTables::default(),
        }
    }

    /// Endpoint this executor queries
    pub fn endpoint(&self) -> &EndpointIdentity {
        &self.endpoint
    }

    /// Configured TTLs
    pub fn ttls(&self) -> CacheTtls {
        self.ttls
    }

    /// Analytics table catalog
    pub fn tables(&self) -> &AnalyticsTables {
        &self.tables
    }

    /// Name of the warehouse provider behind this executor
    pub fn provider_name(&self) -> &str {
        self.connector.provider_name()
    }

    /// Whether a connection handle has been constructed
    pub fn is_connected(&self) -> bool {
        self.connection.initialized()
    }

    fn report(&self, failure: &QueryFailure, subject: impl Into<String>) {
        let notice = OperatorNotice::new(failure.clone(), subject, self.clock.now());
        warn!(kind = failure.kind(), subject = %notice.subject, "{}", failure);
        self.notifier.notify(&notice);
    }

    /// Connection handle, constructed on first use
    ///
    /// At most one construction runs at a time. Callers that queued behind
    /// a failed construction get its failure; a failure is not remembered
    /// past them, so the next call tries again.
    async fn connect(&self) -> Result<Arc<dyn WarehouseConnection>, ConnectFailure> {
        if let Some(connection) = self.connection.get() {
            return Ok(Arc::clone(connection));
        }
        let seen_attempts = self.connect_attempts.load(Ordering::Acquire);
        let mut gate = self.connect_gate.lock().await;
        if let Some(connection) = self.connection.get() {
            return Ok(Arc::clone(connection));
        }
        let waited_on_failure = if gate.attempts == seen_attempts {
            None
        } else {
            gate.failure.clone()
        };
        if let Some(failure) = waited_on_failure {
            return Err(ConnectFailure { failure, ran: false });
        }

        let started = Instant::now();
        let result = self.connector.connect(&self.endpoint).await;
        gate.attempts += 1;
        self.connect_attempts.store(gate.attempts, Ordering::Release);
        match result {
            Ok(connection) => {
                info!(
                    provider = self.connector.provider_name(),
                    endpoint = %self.endpoint,
                    elapsed_ms = started.elapsed().as_millis(),
                    "Warehouse connection established"
                );
                gate.failure = None;
                let stored = self.connection.get_or_init(|| async { connection }).await;
                Ok(Arc::clone(stored))
            }
            Err(e) => {
                let failure = QueryFailure::ConnectionUnavailable {
                    detail: e.to_string(),
                };
                gate.failure = Some(failure.clone());
                Err(ConnectFailure { failure, ran: true })
            }
        }
    }

    /// [`Self::connect`], notifying under `subject` when this caller ran the failed attempt
    async fn connect_reporting(
        &self,
        subject: &str,
    ) -> Result<Arc<dyn WarehouseConnection>, QueryFailure> {
        self.connect().await.map_err(|attempt| {
            if attempt.ran {
                self.report(&attempt.failure, subject);
            }
            attempt.failure
        })
    }

    /// Get the shared connection handle, or `None` when it cannot be built
    pub async fn get_connection(&self) -> Option<Arc<dyn WarehouseConnection>> {
        self.connect_reporting(self.connector.provider_name())
            .await
            .ok()
    }

    async fn fetch_table(
        &self,
        spec: &QuerySpec,
        notify: bool,
    ) -> Result<Arc<ResultTable>, QueryFailure> {
        let subject = query_preview(spec.text());
        let connection = if notify {
            self.connect_reporting(&subject).await?
        } else {
            self.connect().await.map_err(|attempt| attempt.failure)?
        };
        let request = spec.to_request();
        let started = Instant::now();
        let table = connection.run_query(&request).await.map_err(|e| {
            let failure = QueryFailure::ExecutionFailure {
                detail: e.to_string(),
            };
            if notify {
                self.report(&failure, subject.as_str());
            }
            failure
        })?;
        debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            elapsed_ms = started.elapsed().as_millis(),
            "Query executed"
        );
        Ok(Arc::new(table))
    }

    /// Execute a query, returning the typed failure instead of an empty table
    #[instrument(skip_all, fields(cache_key = %spec.cache_key()))]
    pub async fn try_execute(&self, spec: &QuerySpec) -> Result<Arc<ResultTable>, QueryFailure> {
        let key = spec.cache_key();
        let ttl = self.ttls.for_class(spec.cache_class());
        self.tables_cache
            .get_or_try_populate(&key, ttl, || self.fetch_table(spec, true))
            .await
    }

    /// Run a query where failure is an expected answer
    ///
    /// Bypasses the cache and raises no operator notice; failures are only
    /// logged at debug level. Used for discovery queries against datasets
    /// that may not exist.
    pub async fn try_execute_unreported(
        &self,
        spec: &QuerySpec,
    ) -> Result<Arc<ResultTable>, QueryFailure> {
        let result = self.fetch_table(spec, false).await;
        if let Err(failure) = &result {
            debug!(kind = failure.kind(), query = %query_preview(spec.text()), "Unreported query failed");
        }
        result
    }

    /// Execute a query; any failure yields the empty table
    pub async fn execute(&self, spec: &QuerySpec) -> Arc<ResultTable> {
        self.try_execute(spec)
            .await
            .unwrap_or_else(|_| Arc::new(ResultTable::empty()))
    }

    /// Whole-table query over a logical analytics domain
    pub async fn try_query_domain_table(
        &self,
        domain: &str,
        limit: Option<u64>,
    ) -> Result<Arc<ResultTable>, QueryFailure> {
        match self.tables.select_all(&self.endpoint, domain, limit) {
            Ok(spec) => self.try_execute(&spec).await,
            Err(e) => {
                let failure = QueryFailure::ExecutionFailure {
                    detail: e.to_string(),
                };
                self.report(&failure, domain.to_string());
                Err(failure)
            }
        }
    }

    /// Whole-table query over a logical analytics domain; failures yield the empty table
    pub async fn query_domain_table(&self, domain: &str, limit: Option<u64>) -> Arc<ResultTable> {
        self.try_query_domain_table(domain, limit)
            .await
            .unwrap_or_else(|_| Arc::new(ResultTable::empty()))
    }

    async fn fetch_metadata(
        &self,
        table: &str,
        table_ref: &TableRef,
    ) -> Result<TableMetadata, QueryFailure> {
        let connection = self.connect_reporting(table).await?;
        let stats = connection.table_stats(table_ref).await.map_err(|e| {
            let failure = QueryFailure::MetadataNotFound {
                table: table.to_string(),
                detail: e.to_string(),
            };
            self.report(&failure, table);
            failure
        })?;
        Ok(TableMetadata::from_stats(stats))
    }

    /// Catalog metadata for a table, returning the typed failure
    #[instrument(skip(self))]
    pub async fn try_get_table_metadata(&self, table: &str) -> Result<TableMetadata, QueryFailure> {
        match self.endpoint.table_ref(table) {
            Ok(table_ref) => {
                let key = CacheKey::for_table(&table_ref);
                self.metadata_cache
                    .get_or_try_populate(&key, self.ttls.table_info, || {
                        self.fetch_metadata(table, &table_ref)
                    })
                    .await
            }
            Err(e) => {
                let failure = QueryFailure::MetadataNotFound {
                    table: table.to_string(),
                    detail: e.to_string(),
                };
                self.report(&failure, table);
                Err(failure)
            }
        }
    }

    /// Catalog metadata for a table; `None` is the empty mapping
    pub async fn get_table_metadata(&self, table: &str) -> Option<TableMetadata> {
        self.try_get_table_metadata(table).await.ok()
    }

    /// Stored cache entry for a spec, fresh or not
    pub async fn cached_entry(&self, spec: &QuerySpec) -> Option<CacheEntry<Arc<ResultTable>>> {
        self.tables_cache.entry(&spec.cache_key()).await
    }

    /// Drop the cached result of a spec
    pub async fn invalidate(&self, spec: &QuerySpec) -> bool {
        self.tables_cache.invalidate(&spec.cache_key()).await
    }

    /// Drop the cached metadata of a table
    pub async fn invalidate_table_metadata(&self, table: &str) -> bool {
        match self.endpoint.table_ref(table) {
            Ok(table_ref) => {
                self.metadata_cache
                    .invalidate(&CacheKey::for_table(&table_ref))
                    .await
            }
            Err(_) => false,
        }
    }

    /// Drop every cached result and metadata entry
    pub fn clear_cache(&self) {
        self.tables_cache.clear();
        self.metadata_cache.clear();
        info!("Query caches cleared");
    }

    /// Statistics of both caches
    pub async fn cache_stats(&self) -> ExecutorCacheStats {
        ExecutorCacheStats {
            queries: self.tables_cache.stats().await,
            metadata: self.metadata_cache.stats().await,
        }
    }
}

impl std::fmt::Debug for QueryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryExecutor")
            .field("provider", &self.connector.provider_name())
            .field("endpoint", &self.endpoint)
            .field("connected", &self.connection.initialized())
            .field("ttls", &self.ttls)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl QueryServiceInterface for QueryExecutor {
    async fn execute(&self, spec: &QuerySpec) -> Arc<ResultTable> {
        QueryExecutor::execute(self, spec).await
    }

    async fn get_table_metadata(&self, table: &str) -> Option<TableMetadata> {
        QueryExecutor::get_table_metadata(self, table).await
    }
}
