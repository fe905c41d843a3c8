//! TTL Query Cache
//!
//! Explicitly owned memoization store used by the executor. Entries are
//! keyed by [`CacheKey`], carry their own creation time and TTL, and are
//! checked for freshness against an injected [`Clock`] on every lookup.
//! Expired entries are replaced lazily; there is no background sweep.
//!
//! Each key owns an async mutex. Lookup and populate happen under that
//! lock, so concurrent misses for one key result in a single populate call.
//! Callers that queued behind a populate observe its outcome: the stored
//! value on success, a clone of the error on failure. A failure is only
//! handed to callers that were already waiting; the next caller populates
//! again. Slots that hold nothing are removed from the map once no caller
//! references them.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, trace};
use wql_domain::error::QueryFailure;
use wql_domain::ports::infrastructure::Clock;
use wql_domain::value_objects::CacheKey;

/// A memoized value with its freshness window
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// Memoized value
    pub value: V,
    /// When the value was stored
    pub created_at: DateTime<Utc>,
    /// How long the value stays fresh
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    /// Age of the entry at `now`; clock skew backwards counts as zero
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.created_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Whether the entry may still be served at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.age(now) < self.ttl
    }
}

/// Cache Operation Statistics
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses (including expired entries)
    pub misses: u64,
    /// Number of stored entries, fresh or not
    pub entries: u64,
    /// Cache hit rate (0.0 to 1.0)
    pub hit_rate: f64,
}

/// Per-key state guarded by the slot mutex
struct SlotState<V, E> {
    entry: Option<CacheEntry<V>>,
    /// Completed populate runs on this slot
    attempts: u64,
    /// Error of the latest run, if it failed
    failure: Option<E>,
}

impl<V, E> Default for SlotState<V, E> {
    fn default() -> Self {
        Self {
            entry: None,
            attempts: 0,
            failure: None,
        }
    }
}

struct Slot<V, E> {
    state: Mutex<SlotState<V, E>>,
    /// Mirror of `SlotState::attempts`, readable before taking the lock
    attempts: AtomicU64,
}

impl<V, E> Default for Slot<V, E> {
    fn default() -> Self {
        Self {
            state: Mutex::new(SlotState::default()),
            attempts: AtomicU64::new(0),
        }
    }
}

/// Keyed TTL cache with per-key single flight
pub struct QueryCache<V, E = QueryFailure> {
    slots: DashMap<CacheKey, Arc<Slot<V, E>>>,
    clock: Arc<dyn Clock>,
    enabled: bool,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V, E> QueryCache<V, E>
where
    V: Clone + Send + Sync,
    E: Clone + Send + Sync,
{
    /// Create an enabled cache reading time from `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            slots: DashMap::new(),
            clock,
            enabled: true,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Enable or disable memoization
    ///
    /// A disabled cache still serializes populates per key but never
    /// stores or serves a value.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether memoization is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn slot(&self, key: &CacheKey) -> Arc<Slot<V, E>> {
        // Clone the Arc out so no map shard lock is held across an await
        Arc::clone(&self.slots.entry(key.clone()).or_default())
    }

    /// Remove `slot` from the map when only the map and the caller hold it
    ///
    /// Slot handles are cloned under the shard lock, which `remove_if`
    /// also holds, so the count cannot grow during the check.
    fn release(&self, key: &CacheKey, slot: &Arc<Slot<V, E>>) {
        self.slots
            .remove_if(key, |_, stored| Arc::ptr_eq(stored, slot) && Arc::strong_count(stored) == 2);
    }

    /// Number of keys currently tracked, including ones with a populate in flight
    pub fn tracked_keys(&self) -> usize {
        self.slots.len()
    }

    /// Return the fresh value for `key`, or run `populate` and store its result
    ///
    /// Errors from `populate` are not stored. Callers that were waiting on
    /// the same key while it failed receive a clone of that error instead
    /// of running `populate` themselves. An expired entry is dropped before
    /// `populate` runs, so it can never be served again.
    pub async fn get_or_try_populate<F, Fut>(
        &self,
        key: &CacheKey,
        ttl: Duration,
        populate: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let slot = self.slot(key);
        let seen_attempts = slot.attempts.load(Ordering::Acquire);
        let mut state = slot.state.lock().await;

        if self.enabled {
            let now = self.clock.now();
            if let Some(entry) = state.entry.as_ref() {
                if entry.is_fresh(now) {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    trace!(cache_key = %key, "cache hit");
                    return Ok(entry.value.clone());
                }
                debug!(cache_key = %key, age_secs = entry.age(now).as_secs(), "cache entry expired");
            }
            state.entry = None;
        }

        let waited_on_failure = if state.attempts == seen_attempts {
            None
        } else {
            state.failure.clone()
        };
        if let Some(failure) = waited_on_failure {
            trace!(cache_key = %key, "sharing failure of the populate this caller waited on");
            drop(state);
            self.release(key, &slot);
            return Err(failure);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let result = populate().await;

        state.attempts += 1;
        slot.attempts.store(state.attempts, Ordering::Release);
        match &result {
            Ok(value) => {
                state.failure = None;
                if self.enabled {
                    state.entry = Some(CacheEntry {
                        value: value.clone(),
                        created_at: self.clock.now(),
                        ttl,
                    });
                }
            }
            Err(failure) => state.failure = Some(failure.clone()),
        }

        let stored = state.entry.is_some();
        drop(state);
        if !stored {
            self.release(key, &slot);
        }
        result
    }

    /// Snapshot of the stored entry for `key`, fresh or not
    pub async fn entry(&self, key: &CacheKey) -> Option<CacheEntry<V>> {
        let slot = self.slots.get(key).map(|s| Arc::clone(s.value()))?;
        let state = slot.state.lock().await;
        state.entry.clone()
    }

    /// Drop the entry for `key`; returns whether one was stored
    pub async fn invalidate(&self, key: &CacheKey) -> bool {
        let Some(slot) = self.slots.get(key).map(|s| Arc::clone(s.value())) else {
            return false;
        };
        let mut state = slot.state.lock().await;
        let removed = state.entry.take().is_some();
        drop(state);
        self.release(key, &slot);
        removed
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.slots.clear();
    }

    /// Hit/miss counters and entry count
    pub async fn stats(&self) -> CacheStats {
        let slots: Vec<Arc<Slot<V, E>>> =
            self.slots.iter().map(|s| Arc::clone(s.value())).collect();
        let mut entries = 0u64;
        for slot in slots {
            if slot.state.lock().await.entry.is_some() {
                entries += 1;
            }
        }
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        #[allow(clippy::cast_precision_loss)]
        let hit_rate = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };
        CacheStats {
            hits,
            misses,
            entries,
            hit_rate,
        }
    }
}

impl<V, E> std::fmt::Debug for QueryCache<V, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("slots", &self.slots.len())
            .field("enabled", &self.enabled)
            .finish()
    }
}
