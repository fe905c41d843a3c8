//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns that support the application and domain layers.
//!
//! Provider implementations live in `wql-providers` and are discovered through
//! the linkme registries of `wql-application`; this crate decides which ones
//! to build from configuration.
//!
//! ## Module Categories
//!
//! ### Configuration & Wiring
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration (defaults, TOML file, `WQL__` env vars) |
//! | [`bootstrap`] | Turns an [`config::AppConfig`] into a ready `QueryExecutor` |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//!
//! ### Errors
//! | Module | Description |
//! |--------|-------------|
//! | [`error_ext`] | Context helpers converting foreign errors to domain errors |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use bootstrap::{build_executor, build_executor_with_notifier};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
