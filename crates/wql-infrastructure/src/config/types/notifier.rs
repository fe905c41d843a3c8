//! Operator notifier configuration

use serde::{Deserialize, Serialize};
use wql_application::ports::registry::NotifierProviderConfig;

use crate::constants::{DEFAULT_NOTIFIER_CAPACITY, DEFAULT_NOTIFIER_PROVIDER};

/// Notifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Registered notifier name (log, broadcast, null)
    pub provider: String,
    /// Channel capacity of the broadcast notifier
    pub capacity: usize,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_NOTIFIER_PROVIDER.to_string(),
            capacity: DEFAULT_NOTIFIER_CAPACITY,
        }
    }
}

impl NotifierConfig {
    /// Registry configuration for the notifier factory
    pub fn provider_config(&self) -> NotifierProviderConfig {
        NotifierProviderConfig::new(&self.provider).with_capacity(self.capacity)
    }
}
