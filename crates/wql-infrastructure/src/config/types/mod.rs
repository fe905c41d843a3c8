//! Configuration types module

pub mod app;
pub mod cache;
pub mod logging;
pub mod notifier;
pub mod tables;
pub mod warehouse;

// Re-export main types
pub use app::AppConfig;
pub use cache::CacheConfig;
pub use logging::LoggingConfig;
pub use notifier::NotifierConfig;
pub use tables::TablesConfig;
pub use warehouse::WarehouseConfig;
