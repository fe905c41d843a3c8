//! Tests for provider registration
//!
//! Providers in this crate register into the application registries at
//! link time; these tests resolve them by name.

// Force linkme registration of the providers in this crate
extern crate wql_providers;

use wql_application::ports::registry::{
    NotifierProviderConfig, WarehouseProviderConfig, list_notifier_providers,
    list_warehouse_providers, resolve_notifier_provider, resolve_warehouse_provider,
};
use wql_domain::ports::{OperatorNotifier, WarehouseConnector};

#[test]
fn test_warehouse_providers_registered() {
    let names: Vec<&str> = list_warehouse_providers()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert!(names.contains(&"null"), "Available: {names:?}");
    #[cfg(feature = "warehouse-memory")]
    assert!(names.contains(&"memory"), "Available: {names:?}");
    #[cfg(feature = "warehouse-bigquery")]
    assert!(names.contains(&"bigquery"), "Available: {names:?}");
}

#[test]
fn test_resolve_null_warehouse() {
    let connector = resolve_warehouse_provider(&WarehouseProviderConfig::new("null"))
        .expect("null provider should resolve");
    assert_eq!(connector.provider_name(), "null");
}

#[cfg(feature = "warehouse-bigquery")]
#[test]
fn test_resolve_bigquery_without_token_is_deferred() {
    // Missing credentials only surface on connect
    let connector = resolve_warehouse_provider(
        &WarehouseProviderConfig::new("bigquery").with_timeout_secs(5),
    )
    .expect("bigquery provider should resolve");
    assert_eq!(connector.provider_name(), "bigquery");
}

#[test]
fn test_resolve_notifiers() {
    for name in ["log", "broadcast", "null"] {
        let notifier = resolve_notifier_provider(&NotifierProviderConfig::new(name).with_capacity(4))
            .unwrap_or_else(|e| panic!("{name} should resolve: {e}"));
        assert_eq!(notifier.provider_name(), name);
    }
    assert_eq!(list_notifier_providers().len(), 3);
}

#[test]
fn test_unknown_notifier_fails() {
    let err = resolve_notifier_provider(&NotifierProviderConfig::new("pager"))
        .err()
        .unwrap();
    assert!(err.contains("Unknown notifier provider"));
}
