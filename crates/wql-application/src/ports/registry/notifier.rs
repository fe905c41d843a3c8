//! Operator Notifier Registry
//!
//! Auto-registration system for operator notifiers, mirroring the
//! warehouse provider registry.

use std::sync::Arc;

use wql_domain::ports::infrastructure::OperatorNotifier;

/// Configuration for notifier creation
#[derive(Debug, Clone, Default)]
pub struct NotifierProviderConfig {
    /// Provider name (e.g., "log", "broadcast", "null")
    pub provider: String,
    /// Channel capacity for buffered notifiers
    pub capacity: Option<usize>,
}

impl NotifierProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the channel capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

/// Registry entry for operator notifiers
pub struct NotifierProviderEntry {
    /// Unique provider name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create a notifier
    pub factory: fn(&NotifierProviderConfig) -> Result<Arc<dyn OperatorNotifier>, String>,
}

#[linkme::distributed_slice]
pub static NOTIFIER_PROVIDERS: [NotifierProviderEntry] = [..];

/// Resolve notifier by name from registry
pub fn resolve_notifier_provider(
    config: &NotifierProviderConfig,
) -> Result<Arc<dyn OperatorNotifier>, String> {
    if let Some(entry) = NOTIFIER_PROVIDERS
        .iter()
        .find(|entry| entry.name == config.provider)
    {
        return (entry.factory)(config);
    }

    let available: Vec<&str> = NOTIFIER_PROVIDERS.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown notifier provider '{}'. Available providers: {:?}",
        config.provider, available
    ))
}

/// List all registered notifiers as (name, description) pairs
pub fn list_notifier_providers() -> Vec<(&'static str, &'static str)> {
    NOTIFIER_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
