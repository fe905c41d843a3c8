//! Bootstrap wiring
//!
//! Resolves the configured warehouse provider and notifier from the linkme
//! registries and assembles a [`QueryExecutor`]. Building never connects;
//! the first query does.

use std::sync::Arc;

use tracing::info;
use wql_application::ports::registry::{resolve_notifier_provider, resolve_warehouse_provider};
use wql_application::use_cases::QueryExecutor;
use wql_domain::error::Result;
use wql_domain::ports::{Clock, OperatorNotifier, WarehouseConnector};
use wql_providers::clock::SystemClock;

use crate::config::AppConfig;
use crate::config::loader::validate_app_config;
use crate::error_ext::registry_error;

/// Warehouse connector named by the configuration
pub fn resolve_connector(config: &AppConfig) -> Result<Arc<dyn WarehouseConnector>> {
    resolve_warehouse_provider(&config.warehouse.provider_config())
        .map_err(|message| registry_error("warehouse", message))
}

/// Operator notifier named by the configuration
pub fn resolve_notifier(config: &AppConfig) -> Result<Arc<dyn OperatorNotifier>> {
    resolve_notifier_provider(&config.notifier.provider_config())
        .map_err(|message| registry_error("notifier", message))
}

/// Build an executor from configuration alone
pub fn build_executor(config: &AppConfig) -> Result<Arc<QueryExecutor>> {
    let notifier = resolve_notifier(config)?;
    build_executor_with_notifier(config, notifier)
}

/// Build an executor with a caller-owned notifier
///
/// Used when the caller needs a handle on the notifier, e.g. to subscribe
/// to a broadcast channel.
pub fn build_executor_with_notifier(
    config: &AppConfig,
    notifier: Arc<dyn OperatorNotifier>,
) -> Result<Arc<QueryExecutor>> {
    validate_app_config(config)?;
    let connector = resolve_connector(config)?;
    Ok(assemble(config, connector, notifier, SystemClock::new_shared()))
}

/// Assemble an executor from explicit parts
///
/// Skips registry lookup; the configuration supplies the endpoint, TTLs
/// and table catalog.
pub fn assemble(
    config: &AppConfig,
    connector: Arc<dyn WarehouseConnector>,
    notifier: Arc<dyn OperatorNotifier>,
    clock: Arc<dyn Clock>,
) -> Arc<QueryExecutor> {
    info!(
        provider = connector.provider_name(),
        notifier = notifier.provider_name(),
        endpoint = %config.warehouse.endpoint(),
        cache_enabled = config.cache.enabled,
        "Query executor assembled"
    );
    Arc::new(
        QueryExecutor::builder(connector, config.warehouse.endpoint(), clock, notifier)
            .with_ttls(config.cache.ttls())
            .with_cache_enabled(config.cache.enabled)
            .with_tables(config.tables.to_catalog())
            .build(),
    )
}
