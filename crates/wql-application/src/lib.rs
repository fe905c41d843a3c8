//! Application Layer - Warehouse Query Layer
//!
//! Orchestrates the domain ports into the operations a presentation layer
//! calls: run a query, read table metadata, check the connection.
//!
//! ## Architecture
//!
//! The application layer:
//! - Owns the query executor and its TTL caches
//! - Declares the provider registries backends register into
//! - Has no dependencies on infrastructure or concrete backends
//!
//! ## Use Cases
//!
//! - Cached, degrade-to-empty query execution
//! - Table metadata lookup
//! - Logical analytics domain queries
//! - Connection diagnostics
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `wql-domain`: For value objects, errors and port traits
//! - Pure Rust libraries for async, concurrency and logging

pub mod cache;
pub mod ports;
pub mod use_cases;

pub use cache::*;
pub use ports::*;
pub use use_cases::*;
