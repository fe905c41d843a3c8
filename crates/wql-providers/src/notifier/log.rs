//! Log Notifier
//!
//! Reports operator notices through `tracing` at error level.

use std::sync::Arc;

use tracing::error;
use wql_application::ports::registry::{
    NOTIFIER_PROVIDERS, NotifierProviderConfig, NotifierProviderEntry,
};
use wql_domain::events::OperatorNotice;
use wql_domain::ports::infrastructure::OperatorNotifier;

/// Notifier writing every notice to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl LogNotifier {
    /// Create a new log notifier
    pub fn new() -> Self {
        Self
    }
}

impl OperatorNotifier for LogNotifier {
    fn notify(&self, notice: &OperatorNotice) {
        error!(
            kind = notice.failure.kind(),
            subject = %notice.subject,
            raised_at = %notice.raised_at.to_rfc3339(),
            "{}",
            notice.message()
        );
    }

    fn provider_name(&self) -> &str {
        "log"
    }
}

#[linkme::distributed_slice(NOTIFIER_PROVIDERS)]
static LOG_NOTIFIER: NotifierProviderEntry = NotifierProviderEntry {
    name: "log",
    description: "Write notices to the log at error level",
    factory: |_config: &NotifierProviderConfig| Ok(Arc::new(LogNotifier::new())),
};
