//! Query Spec and Cache Key Tests

use std::time::Duration;

use wql_domain::value_objects::{CacheClass, CacheKey, QuerySpec, TableRef};

#[test]
fn test_request_text_appends_limit() {
    let spec = QuerySpec::new("SELECT * FROM t  ").with_limit(10);
    assert_eq!(spec.request_text(), "SELECT * FROM t LIMIT 10");

    let request = spec.to_request();
    assert_eq!(request.query, "SELECT * FROM t LIMIT 10");
    assert_eq!(request.row_cap, Some(10));
}

#[test]
fn test_no_limit_keeps_text() {
    let spec = QuerySpec::new("SELECT 1");
    assert_eq!(spec.request_text(), "SELECT 1");
    assert_eq!(spec.to_request().row_cap, None);
}

#[test]
fn test_zero_limit_means_unlimited() {
    let spec = QuerySpec::new("SELECT 1").with_limit(0);
    assert_eq!(spec.limit(), None);
    assert_eq!(spec.cache_key(), QuerySpec::new("SELECT 1").cache_key());
}

#[test]
fn test_cache_key_is_exact_text() {
    let a = QuerySpec::new("SELECT 1");
    let b = QuerySpec::new("select 1");
    let c = QuerySpec::new("SELECT 1 ");

    assert_eq!(a.cache_key(), QuerySpec::new("SELECT 1").cache_key());
    assert_ne!(a.cache_key(), b.cache_key());
    assert_ne!(a.cache_key(), c.cache_key());
}

#[test]
fn test_cache_key_includes_limit_not_class() {
    let base = QuerySpec::new("SELECT 1");

    assert_ne!(base.cache_key(), base.clone().with_limit(5).cache_key());
    assert_eq!(
        base.cache_key(),
        base.clone().with_cache_class(CacheClass::Charts).cache_key()
    );
}

#[test]
fn test_table_and_query_keys_do_not_collide() {
    let table = TableRef::new("p", "d", "t");
    assert_ne!(CacheKey::for_table(&table), CacheKey::for_query("p.d.t", None));
    assert_eq!(CacheKey::for_table(&table).as_str().len(), 64);
}

#[test]
fn test_cache_class_defaults() {
    assert_eq!(QuerySpec::new("x").cache_class(), CacheClass::DataQueries);
    assert_eq!(CacheClass::DataQueries.default_ttl(), Duration::from_secs(3600));
    assert_eq!(CacheClass::TableInfo.default_ttl(), Duration::from_secs(7200));
    assert_eq!(CacheClass::Charts.default_ttl(), Duration::from_secs(1800));
    assert_eq!(CacheClass::TableInfo.as_str(), "table_info");
}
