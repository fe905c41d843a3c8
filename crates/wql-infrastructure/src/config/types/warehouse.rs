//! Warehouse configuration types

use serde::{Deserialize, Serialize};
use wql_application::ports::registry::WarehouseProviderConfig;
use wql_domain::value_objects::EndpointIdentity;

use crate::constants::{
    DEFAULT_MAX_RESULTS_PER_PAGE, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_WAREHOUSE_LOCATION,
    DEFAULT_WAREHOUSE_PROVIDER, OFFLINE_WAREHOUSE_PROVIDERS,
};

/// Warehouse configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseConfig {
    /// Registered provider name (bigquery, memory, null)
    pub provider: String,
    /// Project holding the datasets
    pub project_id: String,
    /// Dataset used for unqualified table names
    pub dataset_id: String,
    /// Processing location
    pub location: String,
    /// OAuth access token; falls back to the provider's env variable
    pub access_token: Option<String>,
    /// API base URL override
    pub base_url: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Rows requested per result page
    pub max_results_per_page: u32,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_WAREHOUSE_PROVIDER.to_string(),
            project_id: String::new(),
            dataset_id: String::new(),
            location: DEFAULT_WAREHOUSE_LOCATION.to_string(),
            access_token: None,
            base_url: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_results_per_page: DEFAULT_MAX_RESULTS_PER_PAGE,
        }
    }
}

impl WarehouseConfig {
    /// Endpoint identity the executor is bound to
    pub fn endpoint(&self) -> EndpointIdentity {
        EndpointIdentity::new(&self.project_id, &self.dataset_id, &self.location)
    }

    /// Whether the provider runs without a remote endpoint
    pub fn is_offline(&self) -> bool {
        OFFLINE_WAREHOUSE_PROVIDERS.contains(&self.provider.as_str())
    }

    /// Registry configuration for the provider factory
    pub fn provider_config(&self) -> WarehouseProviderConfig {
        let mut config = WarehouseProviderConfig::new(&self.provider)
            .with_timeout_secs(self.request_timeout_secs)
            .with_page_size(self.max_results_per_page);
        if let Some(token) = &self.access_token {
            config = config.with_access_token(token);
        }
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }
        config
    }
}
