//! Warehouse Provider Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | BigQueryConnector | Remote | BigQuery REST v2 |
//! | MemoryWarehouse | In-Process | Canned fixtures for tests and demos |
//! | NullWarehouse | Testing | Empty tables, no catalog |

#[cfg(feature = "warehouse-bigquery")]
pub mod bigquery;
#[cfg(feature = "warehouse-memory")]
pub mod memory;
pub mod null;

#[cfg(feature = "warehouse-bigquery")]
pub use bigquery::{BigQueryConnection, BigQueryConnector};
#[cfg(feature = "warehouse-memory")]
pub use memory::{MemoryConnection, MemoryWarehouse};
pub use null::{NullConnection, NullWarehouse};
