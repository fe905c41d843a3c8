//! Application Ports
//!
//! Port traits live in `wql-domain`; this module re-exports them together
//! with the provider registries and service interfaces declared by the
//! application layer.

pub mod registry;
pub mod services;

pub use services::QueryServiceInterface;
pub use wql_domain::ports::{Clock, OperatorNotifier, WarehouseConnection, WarehouseConnector};
