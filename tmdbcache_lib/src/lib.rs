//! Library layer for the TMDB response cache: freshness logic, storage
//! adapters, and the get-or-fetch client used by serving code.
//!
//! Wraps the `tmdb_api` crate with a database-backed, time-windowed cache of
//! homepage listing responses, plus region detection and cache observability
//! counters.

pub mod cache;
pub mod client;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod metrics;
pub mod region;
pub mod store;
pub mod validation;

pub use tmdb_api;
pub use tmdb_api::{ListQuery, MediaKind, MovieCategory, Page, TrendingWindow, TvCategory};

pub use cache::{CacheHit, Lookup, ResponseCache, DEFAULT_FRESHNESS_WINDOW};
pub use client::{CachedClient, Listing};
pub use envelope::{CacheStatus, CachedPage};
pub use error::TmdbCacheError;
pub use metrics::{CacheStats, CacheStatsSummary};
pub use region::RegionLocator;
pub use store::{CacheStore, EntryInfo, MemoryStore, SqliteStore, StoreError, StoredEntry};
