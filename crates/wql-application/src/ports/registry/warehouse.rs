//! Warehouse Provider Registry
//!
//! Auto-registration system for warehouse backends.
//! Providers register themselves into [`WAREHOUSE_PROVIDERS`] via
//! `linkme::distributed_slice` and are discovered at runtime by name.

use std::sync::Arc;

use wql_domain::ports::providers::WarehouseConnector;

/// Configuration for warehouse provider creation
///
/// Contains all configuration options that a warehouse provider might need.
/// Providers should use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct WarehouseProviderConfig {
    /// Provider name (e.g., "bigquery", "memory", "null")
    pub provider: String,
    /// OAuth access token (for authenticated HTTP backends)
    pub access_token: Option<String>,
    /// Base URL override for the backend API
    pub base_url: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Rows requested per result page
    pub page_size: Option<u32>,
}

impl WarehouseProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the access token
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Set the page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Registry entry for warehouse providers
pub struct WarehouseProviderEntry {
    /// Unique provider name (e.g., "bigquery", "memory", "null")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create a connector
    pub factory: fn(&WarehouseProviderConfig) -> Result<Arc<dyn WarehouseConnector>, String>,
}

#[linkme::distributed_slice]
pub static WAREHOUSE_PROVIDERS: [WarehouseProviderEntry] = [..];

/// Resolve warehouse provider by name from registry
///
/// # Returns
/// * `Ok(Arc<dyn WarehouseConnector>)` - Created connector
/// * `Err(String)` - Error message if provider not found or creation failed
pub fn resolve_warehouse_provider(
    config: &WarehouseProviderConfig,
) -> Result<Arc<dyn WarehouseConnector>, String> {
    if let Some(entry) = WAREHOUSE_PROVIDERS
        .iter()
        .find(|entry| entry.name == config.provider)
    {
        return (entry.factory)(config);
    }

    let available: Vec<&str> = WAREHOUSE_PROVIDERS.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown warehouse provider '{}'. Available providers: {:?}",
        config.provider, available
    ))
}

/// List all registered warehouse providers as (name, description) pairs
pub fn list_warehouse_providers() -> Vec<(&'static str, &'static str)> {
    WAREHOUSE_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
