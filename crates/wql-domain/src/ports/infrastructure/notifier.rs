//! Operator Notifier Port
//!
//! Side channel through which degraded operations are reported. Notifying
//! must never fail the operation that raised the notice, so the contract is
//! infallible and non-blocking.

use crate::events::OperatorNotice;

/// Sink for operator notices
pub trait OperatorNotifier: Send + Sync {
    /// Deliver a notice
    fn notify(&self, notice: &OperatorNotice);

    /// Get the name/identifier of this notifier implementation
    fn provider_name(&self) -> &str;
}
