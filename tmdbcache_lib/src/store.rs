//! Storage adapters behind the response cache.
//!
//! The cache only needs `get` and `upsert`; both adapters keep that surface
//! minimal so an eviction policy can be layered on later without touching the
//! freshness logic. The SQLite adapter additionally exposes inspection and
//! pruning as inherent maintenance operations.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("timestamp parse error: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

/// A stored payload with the time of its last successful write.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub payload: Value,
    pub cached_at: DateTime<Utc>,
}

/// Key and write time of a stored row, for inspection.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub key: String,
    pub cached_at: DateTime<Utc>,
}

/// Key/value storage behind the response cache.
///
/// `upsert` must be atomic at the storage layer: concurrent writers to the
/// same key always end up with exactly one entry, last write winning.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<StoredEntry>, StoreError>;
    fn upsert(
        &self,
        key: &str,
        payload: &Value,
        cached_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}

/// SQLite-backed cache storage.
///
/// One table keyed by the cache key, holding the serialized payload and the
/// write timestamp as RFC 3339 text. The unique key plus `ON CONFLICT`
/// upsert gives the atomicity the cache relies on.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn init(&self) -> Result<(), StoreError> {
        self.lock().execute(
            "CREATE TABLE IF NOT EXISTS tmdb_cache (
                cache_key TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                cached_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get a guard on the underlying connection (for internal use by tests).
    #[doc(hidden)]
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.lock()
    }

    /// Lists all stored keys with their write times, newest first.
    pub fn entries(&self) -> Result<Vec<EntryInfo>, StoreError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT cache_key, cached_at FROM tmdb_cache ORDER BY cached_at DESC, cache_key",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut entries = Vec::new();
        for row in rows {
            let (key, cached_at) = row?;
            entries.push(EntryInfo {
                key,
                cached_at: parse_timestamp(&cached_at)?,
            });
        }
        Ok(entries)
    }

    /// Deletes rows written before `cutoff`, returning the number removed.
    ///
    /// Physical eviction is an explicit maintenance action; reads never
    /// delete, they only report stale rows as misses.
    pub fn prune_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let removed = self.lock().execute(
            "DELETE FROM tmdb_cache WHERE cached_at < ?1",
            params![cutoff.to_rfc3339()],
        )?;
        Ok(removed)
    }
}

impl CacheStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<StoredEntry>, StoreError> {
        let row: Option<(String, String)> = self
            .lock()
            .query_row(
                "SELECT data, cached_at FROM tmdb_cache WHERE cache_key = ?1",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let Some((data, cached_at)) = row else {
            return Ok(None);
        };
        Ok(Some(StoredEntry {
            payload: serde_json::from_str(&data)?,
            cached_at: parse_timestamp(&cached_at)?,
        }))
    }

    fn upsert(
        &self,
        key: &str,
        payload: &Value,
        cached_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let data = serde_json::to_string(payload)?;
        self.lock().execute(
            "INSERT INTO tmdb_cache (cache_key, data, cached_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(cache_key) DO UPDATE SET
               data = excluded.data,
               cached_at = excluded.cached_at",
            params![key, data, cached_at.to_rfc3339()],
        )?;
        Ok(())
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

/// In-memory cache storage backed by `DashMap`, for tests and ephemeral use.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, StoredEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<StoredEntry>, StoreError> {
        Ok(self.entries.get(key).map(|e| e.clone()))
    }

    fn upsert(
        &self,
        key: &str,
        payload: &Value,
        cached_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.entries.insert(
            key.to_string(),
            StoredEntry {
                payload: payload.clone(),
                cached_at,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn open_store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.init().unwrap();
        store
    }

    #[test]
    fn sqlite_roundtrip() {
        let store = open_store();
        let payload = json!([{"id": 1, "title": "A"}, {"id": 2, "title": "B"}]);
        let now = Utc::now();

        store.upsert("popular_movies", &payload, now).unwrap();
        let entry = store.get("popular_movies").unwrap().unwrap();

        assert_eq!(entry.payload, payload);
        // RFC 3339 text roundtrips to the same instant
        assert_eq!(entry.cached_at.timestamp_millis(), now.timestamp_millis());
    }

    #[test]
    fn sqlite_absent_key_is_none() {
        let store = open_store();
        assert!(store.get("never_written").unwrap().is_none());
    }

    #[test]
    fn sqlite_upsert_keeps_single_row() {
        let store = open_store();
        let now = Utc::now();

        store.upsert("trending_movies_day", &json!([1]), now).unwrap();
        store
            .upsert("trending_movies_day", &json!([2, 3]), now + Duration::hours(1))
            .unwrap();

        let count: i64 = store
            .conn()
            .query_row(
                "SELECT COUNT(1) FROM tmdb_cache WHERE cache_key = 'trending_movies_day'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);

        let entry = store.get("trending_movies_day").unwrap().unwrap();
        assert_eq!(entry.payload, json!([2, 3]));
    }

    #[test]
    fn sqlite_keys_are_independent() {
        let store = open_store();
        let now = Utc::now();

        store.upsert("regional_movies_US", &json!(["us"]), now).unwrap();
        store.upsert("regional_movies_FR", &json!(["fr"]), now).unwrap();

        assert_eq!(
            store.get("regional_movies_US").unwrap().unwrap().payload,
            json!(["us"])
        );
        assert_eq!(
            store.get("regional_movies_FR").unwrap().unwrap().payload,
            json!(["fr"])
        );
        // key matching is case-sensitive
        assert!(store.get("regional_movies_us").unwrap().is_none());
    }

    #[test]
    fn sqlite_malformed_timestamp_is_an_error() {
        let store = open_store();
        store
            .conn()
            .execute(
                "INSERT INTO tmdb_cache (cache_key, data, cached_at)
                 VALUES ('bad_row', '[]', 'not-a-timestamp')",
                [],
            )
            .unwrap();

        assert!(matches!(
            store.get("bad_row"),
            Err(StoreError::Timestamp(_))
        ));
    }

    #[test]
    fn sqlite_malformed_payload_is_an_error() {
        let store = open_store();
        store
            .conn()
            .execute(
                "INSERT INTO tmdb_cache (cache_key, data, cached_at)
                 VALUES ('bad_json', '{truncated', ?1)",
                params![Utc::now().to_rfc3339()],
            )
            .unwrap();

        assert!(matches!(store.get("bad_json"), Err(StoreError::Json(_))));
    }

    #[test]
    fn sqlite_entries_newest_first() {
        let store = open_store();
        let now = Utc::now();

        store.upsert("older", &json!([]), now - Duration::hours(2)).unwrap();
        store.upsert("newer", &json!([]), now).unwrap();

        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "newer");
        assert_eq!(entries[1].key, "older");
    }

    #[test]
    fn sqlite_prune_removes_only_old_rows() {
        let store = open_store();
        let now = Utc::now();

        store.upsert("stale", &json!([]), now - Duration::hours(48)).unwrap();
        store.upsert("fresh", &json!([]), now).unwrap();

        let removed = store.prune_older_than(now - Duration::hours(24)).unwrap();
        assert_eq!(removed, 1);
        assert!(store.get("stale").unwrap().is_none());
        assert!(store.get("fresh").unwrap().is_some());
    }

    #[test]
    fn memory_store_roundtrip_and_overwrite() {
        let store = MemoryStore::new();
        let now = Utc::now();

        store.upsert("popular_tv", &json!([{"id": 9}]), now).unwrap();
        store.upsert("popular_tv", &json!([{"id": 10}]), now).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get("popular_tv").unwrap().unwrap().payload,
            json!([{"id": 10}])
        );
        assert!(store.get("popular_movies").unwrap().is_none());
    }
}
