//! Freshness layer over the cache store.
//!
//! The cache is a passive key/value layer: it decides whether a stored
//! payload is still usable and persists payloads the caller fetched, but it
//! never contacts the upstream source itself. Callers own the fetch.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::metrics::{CacheStats, CacheStatsSummary};
use crate::store::CacheStore;

/// Default freshness window. Entries at least this old are served as misses.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(12 * 60 * 60);

/// A fresh entry returned by [`ResponseCache::get`].
#[derive(Debug, Clone)]
pub struct CacheHit {
    pub payload: Value,
    pub cached_at: DateTime<Utc>,
    /// Entry age in hours, rounded to one decimal place for display.
    pub age_hours: f64,
}

/// Outcome of a cache lookup. Absent and stale entries are both misses;
/// callers fall through to the upstream source either way.
#[derive(Debug, Clone)]
pub enum Lookup {
    Hit(CacheHit),
    Miss,
}

/// Keyed, time-windowed store of upstream API responses.
///
/// One freshness window governs every entry. Storage failures are never
/// raised: reads degrade to a miss and writes are dropped, with both logged
/// and counted on [`CacheStats`]. Caching stays advisory.
///
/// There is no per-key locking or request coalescing. Two concurrent
/// callers that both miss on a key will both fetch upstream and both write;
/// the later write wins. The storage layer's atomic upsert guarantees a
/// single entry per key regardless.
pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
    window: Duration,
    stats: CacheStats,
}

impl ResponseCache {
    /// Creates a cache over `store` with an explicit freshness window.
    pub fn new(store: Arc<dyn CacheStore>, window: Duration) -> Self {
        Self {
            store,
            window,
            stats: CacheStats::new(),
        }
    }

    /// Creates a cache with the 12-hour default window.
    pub fn with_default_window(store: Arc<dyn CacheStore>) -> Self {
        Self::new(store, DEFAULT_FRESHNESS_WINDOW)
    }

    /// The configured freshness window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Looks up `key`, returning a hit only for an entry younger than the
    /// freshness window. Stale entries are left in place and reported as
    /// misses. Read-only; any storage failure is also a miss.
    pub fn get(&self, key: &str) -> Lookup {
        let entry = match self.store.get(key) {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                self.stats.record_absent_miss();
                return Lookup::Miss;
            }
            Err(e) => {
                tracing::warn!("cache read for '{}' failed, treating as miss: {}", key, e);
                self.stats.record_read_error();
                return Lookup::Miss;
            }
        };

        let age = Utc::now().signed_duration_since(entry.cached_at);
        let age_secs = age.num_milliseconds() as f64 / 1000.0;
        if age_secs >= self.window.as_secs_f64() {
            self.stats.record_stale_miss();
            return Lookup::Miss;
        }

        self.stats.record_hit();
        Lookup::Hit(CacheHit {
            payload: entry.payload,
            cached_at: entry.cached_at,
            age_hours: round_tenth(age_secs.max(0.0) / 3600.0),
        })
    }

    /// Upserts `payload` under `key` with `cached_at = now`.
    ///
    /// A failed write is logged and dropped: the caller already holds fresh
    /// data, so the failure only costs a future cache miss.
    pub fn put(&self, key: &str, payload: &Value) {
        if let Err(e) = self.store.upsert(key, payload, Utc::now()) {
            tracing::warn!("cache write for '{}' failed, dropping: {}", key, e);
            self.stats.record_write_error();
        }
    }

    /// Snapshot of the lookup/write counters.
    pub fn stats(&self) -> CacheStatsSummary {
        self.stats.summary()
    }
}

fn round_tenth(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, SqliteStore, StoreError, StoredEntry};
    use chrono::Duration as ChronoDuration;
    use serde_json::json;

    fn sqlite_cache(window: Duration) -> (Arc<SqliteStore>, ResponseCache) {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        store.init().unwrap();
        let cache = ResponseCache::new(store.clone(), window);
        (store, cache)
    }

    #[test]
    fn put_then_get_roundtrips() {
        let (_store, cache) = sqlite_cache(DEFAULT_FRESHNESS_WINDOW);
        let payload = json!([{"id": 1, "title": "A"}]);

        cache.put("trending_movies_day", &payload);
        match cache.get("trending_movies_day") {
            Lookup::Hit(hit) => {
                assert_eq!(hit.payload, payload);
                assert_eq!(hit.age_hours, 0.0);
            }
            Lookup::Miss => panic!("expected hit immediately after put"),
        }

        let summary = cache.stats();
        assert_eq!(summary.hits, 1);
        assert_eq!(summary.misses(), 0);
    }

    #[test]
    fn absent_key_is_a_miss_not_an_error() {
        let (_store, cache) = sqlite_cache(DEFAULT_FRESHNESS_WINDOW);
        assert!(matches!(cache.get("never_written"), Lookup::Miss));
        assert_eq!(cache.stats().absent_misses, 1);
    }

    #[test]
    fn entry_older_than_window_is_a_miss_but_stays_stored() {
        let (store, cache) = sqlite_cache(DEFAULT_FRESHNESS_WINDOW);
        let written = Utc::now() - ChronoDuration::hours(13);
        store
            .upsert("popular_movies", &json!([1, 2]), written)
            .unwrap();

        assert!(matches!(cache.get("popular_movies"), Lookup::Miss));
        assert_eq!(cache.stats().stale_misses, 1);

        // the stale row is left in place, not deleted
        let entry = CacheStore::get(store.as_ref(), "popular_movies")
            .unwrap()
            .unwrap();
        assert_eq!(entry.payload, json!([1, 2]));
    }

    #[test]
    fn entry_just_inside_window_is_a_hit() {
        let (store, cache) = sqlite_cache(Duration::from_secs(12 * 3600));
        let written = Utc::now() - ChronoDuration::hours(12) + ChronoDuration::minutes(1);
        store.upsert("popular_tv", &json!([]), written).unwrap();

        assert!(matches!(cache.get("popular_tv"), Lookup::Hit(_)));
    }

    #[test]
    fn age_is_reported_in_hours_to_one_decimal() {
        let (store, cache) = sqlite_cache(DEFAULT_FRESHNESS_WINDOW);
        let written = Utc::now() - ChronoDuration::hours(6);
        store
            .upsert("top_rated_movies", &json!([{"id": 5}]), written)
            .unwrap();

        match cache.get("top_rated_movies") {
            Lookup::Hit(hit) => {
                assert!((hit.age_hours - 6.0).abs() < 0.05, "got {}", hit.age_hours);
                assert_eq!(hit.cached_at.timestamp(), written.timestamp());
            }
            Lookup::Miss => panic!("expected hit for a 6h-old entry"),
        }
    }

    #[test]
    fn overwrite_replaces_payload_and_resets_age() {
        let (store, cache) = sqlite_cache(DEFAULT_FRESHNESS_WINDOW);
        store
            .upsert("upcoming_movies", &json!(["old"]), Utc::now() - ChronoDuration::hours(11))
            .unwrap();

        cache.put("upcoming_movies", &json!(["new"]));
        match cache.get("upcoming_movies") {
            Lookup::Hit(hit) => {
                assert_eq!(hit.payload, json!(["new"]));
                assert_eq!(hit.age_hours, 0.0);
            }
            Lookup::Miss => panic!("expected hit after overwrite"),
        }
    }

    #[test]
    fn keys_are_independent_and_case_sensitive() {
        let (_store, cache) = sqlite_cache(DEFAULT_FRESHNESS_WINDOW);
        cache.put("regional_movies_US", &json!(["us"]));
        cache.put("regional_movies_FR", &json!(["fr"]));

        assert!(matches!(cache.get("regional_movies_US"), Lookup::Hit(_)));
        assert!(matches!(cache.get("regional_movies_FR"), Lookup::Hit(_)));
        assert!(matches!(cache.get("regional_movies_us"), Lookup::Miss));
    }

    #[test]
    fn shorter_window_expires_sooner() {
        let store = Arc::new(MemoryStore::new());
        let written = Utc::now() - ChronoDuration::hours(2);
        store.upsert("trending_tv_day", &json!([]), written).unwrap();

        let narrow = ResponseCache::new(store.clone(), Duration::from_secs(3600));
        assert!(matches!(narrow.get("trending_tv_day"), Lookup::Miss));

        let wide = ResponseCache::new(store, Duration::from_secs(3 * 3600));
        assert!(matches!(wide.get("trending_tv_day"), Lookup::Hit(_)));
    }

    /// Store whose reads and writes always fail, for the degraded path.
    struct BrokenStore;

    impl CacheStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<StoredEntry>, StoreError> {
            Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
        }

        fn upsert(
            &self,
            _key: &str,
            _payload: &Value,
            _cached_at: DateTime<Utc>,
        ) -> Result<(), StoreError> {
            Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery))
        }
    }

    #[test]
    fn read_failure_degrades_to_miss() {
        let cache = ResponseCache::with_default_window(Arc::new(BrokenStore));
        assert!(matches!(cache.get("popular_movies"), Lookup::Miss));
        assert_eq!(cache.stats().read_errors, 1);
    }

    #[test]
    fn write_failure_is_swallowed_and_counted() {
        let cache = ResponseCache::with_default_window(Arc::new(BrokenStore));
        cache.put("popular_movies", &json!([]));
        assert_eq!(cache.stats().write_errors, 1);
    }

    #[test]
    fn rounding_is_to_one_decimal() {
        assert_eq!(round_tenth(6.04), 6.0);
        assert_eq!(round_tenth(6.06), 6.1);
        assert_eq!(round_tenth(0.0), 0.0);
        assert_eq!(round_tenth(11.96), 12.0);
    }
}
