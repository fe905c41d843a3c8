//! Tests for the TTL query cache

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::task::JoinSet;

use wql_application::cache::{CacheEntry, QueryCache};
use wql_domain::value_objects::CacheKey;
use wql_providers::clock::ManualClock;

use crate::fixtures::start_time;

fn cache() -> (QueryCache<u32, String>, ManualClock) {
    let clock = ManualClock::new(start_time());
    (QueryCache::new(Arc::new(clock.clone())), clock)
}

fn key(text: &str) -> CacheKey {
    CacheKey::for_query(text, None)
}

const TTL: Duration = Duration::from_secs(60);

#[tokio::test]
async fn test_populates_once_then_hits() {
    let (cache, _clock) = cache();
    let calls = AtomicU32::new(0);

    for _ in 0..3 {
        let value = cache
            .get_or_try_populate(&key("q"), TTL, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(7)
            })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_errors_are_returned_and_not_stored() {
    let (cache, _clock) = cache();

    let err = cache
        .get_or_try_populate(&key("q"), TTL, || async { Err::<u32, _>("boom".to_string()) })
        .await
        .unwrap_err();
    assert_eq!(err, "boom");
    assert!(cache.entry(&key("q")).await.is_none());

    let value = cache
        .get_or_try_populate(&key("q"), TTL, || async { Ok::<_, String>(1) })
        .await
        .unwrap();
    assert_eq!(value, 1);
}

#[tokio::test]
async fn test_expired_entry_is_replaced() {
    let (cache, clock) = cache();

    cache
        .get_or_try_populate(&key("q"), TTL, || async { Ok::<_, String>(1) })
        .await
        .unwrap();
    clock.advance(TTL);
    let value = cache
        .get_or_try_populate(&key("q"), TTL, || async { Ok::<_, String>(2) })
        .await
        .unwrap();

    assert_eq!(value, 2);
    let entry = cache.entry(&key("q")).await.unwrap();
    assert_eq!(entry.created_at, start_time() + chrono::Duration::seconds(60));
}

#[tokio::test]
async fn test_stale_entry_is_dropped_even_when_refresh_fails() {
    let (cache, clock) = cache();

    cache
        .get_or_try_populate(&key("q"), TTL, || async { Ok::<_, String>(1) })
        .await
        .unwrap();
    clock.advance(TTL * 2);
    let _ = cache
        .get_or_try_populate(&key("q"), TTL, || async { Err::<u32, _>("refresh failed".to_string()) })
        .await;

    assert!(cache.entry(&key("q")).await.is_none());
}

#[tokio::test]
async fn test_disabled_cache_never_stores() {
    let clock = ManualClock::new(start_time());
    let cache: QueryCache<u32, String> = QueryCache::new(Arc::new(clock)).with_enabled(false);
    let calls = AtomicU32::new(0);

    for _ in 0..2 {
        cache
            .get_or_try_populate(&key("q"), TTL, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(1)
            })
            .await
            .unwrap();
    }

    assert!(!cache.is_enabled());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.stats().await.entries, 0);
}

#[tokio::test]
async fn test_invalidate_clear_and_stats() {
    let (cache, _clock) = cache();
    for text in ["a", "b"] {
        cache
            .get_or_try_populate(&key(text), TTL, || async { Ok::<_, String>(1) })
            .await
            .unwrap();
    }
    cache
        .get_or_try_populate(&key("a"), TTL, || async { Ok::<_, String>(1) })
        .await
        .unwrap();

    let stats = cache.stats().await;
    assert_eq!((stats.hits, stats.misses, stats.entries), (1, 2, 2));

    assert!(cache.invalidate(&key("a")).await);
    assert!(!cache.invalidate(&key("missing")).await);
    assert_eq!(cache.stats().await.entries, 1);

    cache.clear();
    assert_eq!(cache.stats().await.entries, 0);
}

#[tokio::test]
async fn test_waiters_share_a_failed_populate() {
    let (cache, _clock) = cache();
    let cache = Arc::new(cache);
    let calls = Arc::new(AtomicU32::new(0));

    let mut tasks = JoinSet::new();
    for _ in 0..8 {
        let cache = Arc::clone(&cache);
        let calls = Arc::clone(&calls);
        tasks.spawn(async move {
            cache
                .get_or_try_populate(&key("q"), TTL, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    Err::<u32, _>("backend down".to_string())
                })
                .await
        });
    }
    let mut errors = Vec::new();
    while let Some(result) = tasks.join_next().await {
        errors.push(result.unwrap().unwrap_err());
    }

    assert_eq!(errors.len(), 8);
    assert!(errors.iter().all(|e| e == "backend down"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.tracked_keys(), 0);

    // The failure is not remembered for callers that arrive afterwards
    let value = cache
        .get_or_try_populate(&key("q"), TTL, || async { Ok::<_, String>(3) })
        .await
        .unwrap();
    assert_eq!(value, 3);
}

#[tokio::test]
async fn test_failed_keys_leave_no_slots_behind() {
    let (cache, _clock) = cache();

    for i in 0..100 {
        let _ = cache
            .get_or_try_populate(&key(&format!("q{i}")), TTL, || async {
                Err::<u32, _>("boom".to_string())
            })
            .await;
    }

    assert_eq!(cache.tracked_keys(), 0);
    assert_eq!(cache.stats().await.entries, 0);
}

#[tokio::test]
async fn test_invalidate_removes_the_slot() {
    let (cache, _clock) = cache();
    cache
        .get_or_try_populate(&key("q"), TTL, || async { Ok::<_, String>(1) })
        .await
        .unwrap();
    assert_eq!(cache.tracked_keys(), 1);

    assert!(cache.invalidate(&key("q")).await);
    assert_eq!(cache.tracked_keys(), 0);
    assert!(cache.entry(&key("q")).await.is_none());
}

#[test]
fn test_entry_freshness_window() {
    let entry = CacheEntry {
        value: (),
        created_at: start_time(),
        ttl: TTL,
    };

    assert!(entry.is_fresh(start_time()));
    assert!(entry.is_fresh(start_time() + chrono::Duration::seconds(59)));
    assert!(!entry.is_fresh(start_time() + chrono::Duration::seconds(60)));
    // A clock that moved backwards reads as age zero
    assert_eq!(
        entry.age(start_time() - chrono::Duration::seconds(5)),
        Duration::ZERO
    );
}
