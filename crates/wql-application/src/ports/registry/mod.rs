//! Provider Registry System
//!
//! Backends and notifiers register themselves at link time and are
//! resolved by the name given in configuration.
//!
//! ## Registries
//!
//! | Registry | Port |
//! |----------|------|
//! | [`WAREHOUSE_PROVIDERS`] | `WarehouseConnector` |
//! | [`NOTIFIER_PROVIDERS`] | `OperatorNotifier` |

pub mod notifier;
pub mod warehouse;

pub use notifier::{
    NOTIFIER_PROVIDERS, NotifierProviderConfig, NotifierProviderEntry, list_notifier_providers,
    resolve_notifier_provider,
};
pub use warehouse::{
    WAREHOUSE_PROVIDERS, WarehouseProviderConfig, WarehouseProviderEntry,
    list_warehouse_providers, resolve_warehouse_provider,
};
