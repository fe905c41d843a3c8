//! External Provider Ports
//!
//! Ports for external services the domain depends on.
//!
//! ## Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | WarehouseConnector | Builds connection handles to an analytical backend |
//! | WarehouseConnection | Runs queries and catalog lookups on a live handle |

/// Warehouse provider port
pub mod warehouse;

pub use warehouse::{WarehouseConnection, WarehouseConnector};
