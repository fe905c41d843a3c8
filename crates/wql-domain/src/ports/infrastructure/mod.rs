//! Infrastructure Service Ports

/// Clock port
pub mod clock;
/// Operator notifier port
pub mod notifier;

pub use clock::Clock;
pub use notifier::OperatorNotifier;
