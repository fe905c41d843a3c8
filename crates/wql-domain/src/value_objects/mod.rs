//! Domain Value Objects
//!
//! Immutable value objects that represent concepts in the domain
//! without identity. Value objects are defined by their attributes
//! and can be compared for equality.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`ResultTable`] | Well-formed tabular query result |
//! | [`QuerySpec`] | Caller-side query request |
//! | [`BackendRequest`] | Request submitted to a warehouse connection |
//! | [`CacheKey`] | Identity of a memoized result |
//! | [`EndpointIdentity`] | Project/dataset/location triple |
//! | [`TableRef`] | Fully qualified catalog table |
//! | [`TableStats`] | Raw catalog statistics |
//! | [`TableMetadata`] | Fixed-shape metadata view |

/// Warehouse endpoint value objects
pub mod endpoint;
/// Table metadata value objects
pub mod metadata;
/// Query request value objects
pub mod query;
/// Tabular result value objects
pub mod table;

// Re-export commonly used value objects
pub use endpoint::{EndpointIdentity, TableRef};
pub use metadata::{TableMetadata, TableStats, bytes_to_megabytes};
pub use query::{BackendRequest, CacheClass, CacheKey, QuerySpec};
pub use table::{Cell, Column, ColumnType, ResultTable};
