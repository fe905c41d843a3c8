//! # Warehouse Query Layer - Domain
//!
//! Core types and port traits for a cache-aware analytical query layer.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Result tables, query specs, endpoints, metadata |
//! | [`events`] | Operator notices raised on degraded operations |
//! | [`ports`] | Warehouse, clock and notifier contracts |
//! | [`error`] | Error types and the boundary failure taxonomy |
//! | [`constants`] | Domain constants (TTL classes, size conversion) |

pub mod constants;
pub mod error;
pub mod events;
pub mod ports;
pub mod value_objects;

// Re-export commonly used types
pub use error::{Error, QueryFailure, Result};
pub use events::OperatorNotice;
pub use value_objects::{
    BackendRequest, CacheClass, CacheKey, Cell, Column, ColumnType, EndpointIdentity, QuerySpec,
    ResultTable, TableMetadata, TableRef, TableStats,
};
