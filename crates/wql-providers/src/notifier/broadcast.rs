//! Broadcast Notifier
//!
//! Fans operator notices out over a tokio broadcast channel so a
//! presentation layer can show them. Notices are also logged, so nothing
//! is lost when nobody subscribes.
//!
//! ## Example
//!
//! ```ignore
//! use wql_providers::notifier::BroadcastNotifier;
//!
//! let notifier = BroadcastNotifier::new();
//! let mut notices = notifier.subscribe();
//! // hand `Arc::new(notifier)` to the executor, then:
//! while let Ok(notice) = notices.recv().await {
//!     show_banner(notice.message());
//! }
//! ```

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, error};
use wql_application::ports::registry::{
    NOTIFIER_PROVIDERS, NotifierProviderConfig, NotifierProviderEntry,
};
use wql_domain::events::OperatorNotice;
use wql_domain::ports::infrastructure::OperatorNotifier;

use crate::constants::BROADCAST_DEFAULT_CAPACITY;

/// Notifier publishing notices to every subscriber
///
/// When the channel is full the oldest notices are dropped for lagging
/// subscribers.
#[derive(Clone)]
pub struct BroadcastNotifier {
    sender: Arc<broadcast::Sender<OperatorNotice>>,
    capacity: usize,
}

impl BroadcastNotifier {
    /// Create a notifier with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(BROADCAST_DEFAULT_CAPACITY)
    }

    /// Create with custom capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of notices buffered per subscriber
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
            capacity,
        }
    }

    /// Receive every notice raised from now on
    pub fn subscribe(&self) -> broadcast::Receiver<OperatorNotice> {
        self.sender.subscribe()
    }

    /// Get the current number of subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BroadcastNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BroadcastNotifier")
            .field("capacity", &self.capacity)
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

impl OperatorNotifier for BroadcastNotifier {
    fn notify(&self, notice: &OperatorNotice) {
        error!(kind = notice.failure.kind(), subject = %notice.subject, "{}", notice.message());
        match self.sender.send(notice.clone()) {
            Ok(count) => debug!("Published notice to {} subscribers", count),
            Err(_) => debug!("Published notice but no subscribers"),
        }
    }

    fn provider_name(&self) -> &str {
        "broadcast"
    }
}

#[linkme::distributed_slice(NOTIFIER_PROVIDERS)]
static BROADCAST_NOTIFIER: NotifierProviderEntry = NotifierProviderEntry {
    name: "broadcast",
    description: "Broadcast notices to in-process subscribers (also logs)",
    factory: |config: &NotifierProviderConfig| {
        Ok(Arc::new(BroadcastNotifier::with_capacity(
            config.capacity.unwrap_or(BROADCAST_DEFAULT_CAPACITY),
        )))
    },
};
