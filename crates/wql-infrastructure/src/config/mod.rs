//! Configuration
//!
//! Layered application configuration: defaults, then a TOML file, then
//! `WQL__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::*;
