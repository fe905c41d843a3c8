//! Domain Port Interfaces
//!
//! Defines all boundary contracts between domain and external layers.
//!
//! ## Architecture
//!
//! Ports define the contracts that external layers must implement.
//! This follows the Dependency Inversion Principle:
//! - High-level modules (domain, application) define interfaces
//! - Low-level modules (providers, infrastructure) implement them
//!
//! ## Organization
//!
//! - **infrastructure/** - Infrastructure services (clock, operator notifications)
//! - **providers/** - External service provider ports (warehouse backends)

/// Infrastructure service ports
pub mod infrastructure;
/// External service provider ports
pub mod providers;

// Re-export commonly used port traits for convenience
pub use infrastructure::{Clock, OperatorNotifier};
pub use providers::{WarehouseConnection, WarehouseConnector};
