//! Null Notifier
//!
//! Discards all notices.

use std::sync::Arc;

use wql_application::ports::registry::{
    NOTIFIER_PROVIDERS, NotifierProviderConfig, NotifierProviderEntry,
};
use wql_domain::events::OperatorNotice;
use wql_domain::ports::infrastructure::OperatorNotifier;

/// Notifier that drops every notice
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl NullNotifier {
    /// Create a new null notifier
    pub fn new() -> Self {
        Self
    }
}

impl OperatorNotifier for NullNotifier {
    fn notify(&self, _notice: &OperatorNotice) {}

    fn provider_name(&self) -> &str {
        "null"
    }
}

#[linkme::distributed_slice(NOTIFIER_PROVIDERS)]
static NULL_NOTIFIER: NotifierProviderEntry = NotifierProviderEntry {
    name: "null",
    description: "Discard notices",
    factory: |_config: &NotifierProviderConfig| Ok(Arc::new(NullNotifier::new())),
};
