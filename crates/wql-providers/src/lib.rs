//! # Warehouse Query Layer - Provider Implementations
//!
//! This crate contains all user-selectable provider implementations. Each
//! provider implements a port (trait) defined in `wql-domain` and, where a
//! registry exists, registers itself with `wql-application` at link time.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Warehouse | `WarehouseConnector` | BigQuery, Memory, Null |
//! | Notifier | `OperatorNotifier` | Log, Broadcast, Null |
//! | Clock | `Clock` | System, Manual |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! wql-providers = { version = "0.1", default-features = false, features = ["warehouse-memory"] }
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use wql_providers::warehouse::BigQueryConnector;
//! use wql_providers::notifier::BroadcastNotifier;
//! use wql_providers::clock::SystemClock;
//! ```

// Re-export wql-domain types commonly used with providers
pub use wql_domain::error::{Error, Result};
pub use wql_domain::ports::{Clock, OperatorNotifier, WarehouseConnection, WarehouseConnector};

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// Warehouse backends
///
/// Implements `WarehouseConnector` / `WarehouseConnection`.
pub mod warehouse;

/// Operator notifiers
///
/// Implements `OperatorNotifier`.
pub mod notifier;

/// Clock implementations
pub mod clock;

pub use clock::{ManualClock, SystemClock};
