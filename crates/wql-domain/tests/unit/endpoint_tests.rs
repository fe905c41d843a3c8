//! Endpoint and Table Reference Tests

use wql_domain::value_objects::{EndpointIdentity, TableRef};

fn endpoint() -> EndpointIdentity {
    EndpointIdentity::new("proj", "analytics", "US")
}

#[test]
fn test_bare_table_uses_endpoint_dataset() {
    let table = endpoint().table_ref("orders").unwrap();
    assert_eq!(table, TableRef::new("proj", "analytics", "orders"));
}

#[test]
fn test_partially_qualified() {
    let table = endpoint().table_ref("staging.orders").unwrap();
    assert_eq!(table.to_string(), "proj.staging.orders");

    let table = endpoint().table_ref("`other.raw.orders`").unwrap();
    assert_eq!(table.to_string(), "other.raw.orders");
}

#[test]
fn test_invalid_identifiers() {
    for identifier in ["", "a..b", "a.b.c.d", "."] {
        assert!(
            endpoint().table_ref(identifier).is_err(),
            "{identifier:?} should be rejected"
        );
    }
}

#[test]
fn test_quoted_and_display() {
    let table = TableRef::new("p", "d", "t");
    assert_eq!(table.quoted(), "`p.d.t`");
    assert_eq!(endpoint().to_string(), "proj.analytics (US)");
}
