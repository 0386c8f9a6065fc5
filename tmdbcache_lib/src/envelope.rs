//! Caller-visible response envelope.
//!
//! The same shape is used whether data came from the cache or straight from
//! upstream; `cache_status` tells the two apart. Cached data is always a
//! synthetic page 1, since only first pages are ever cached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::CacheHit;
use tmdb_api::Page;

/// Provenance of the results in a [`CachedPage`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStatus {
    pub is_cached: bool,
    pub cached_at: Option<DateTime<Utc>>,
    pub cache_age_hours: Option<f64>,
}

/// One listing page as served to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedPage {
    pub results: Vec<Value>,
    pub page: i64,
    pub cache_status: CacheStatus,
}

impl CachedPage {
    /// Envelope for a cache hit: the stored item list as page 1.
    pub fn from_hit(hit: CacheHit) -> Self {
        let results = match hit.payload {
            Value::Array(items) => items,
            other => vec![other],
        };
        Self {
            results,
            page: 1,
            cache_status: CacheStatus {
                is_cached: true,
                cached_at: Some(hit.cached_at),
                cache_age_hours: Some(hit.age_hours),
            },
        }
    }

    /// Envelope for a live upstream page.
    pub fn from_live(page: Page) -> Self {
        Self {
            results: page.results,
            page: page.page,
            cache_status: CacheStatus {
                is_cached: false,
                cached_at: None,
                cache_age_hours: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cached_envelope_shape() {
        let cached_at = Utc::now();
        let page = CachedPage::from_hit(CacheHit {
            payload: json!([{"id": 1}]),
            cached_at,
            age_hours: 6.0,
        });

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["results"], json!([{"id": 1}]));
        assert_eq!(value["page"], 1);
        assert_eq!(value["cache_status"]["is_cached"], true);
        assert_eq!(value["cache_status"]["cache_age_hours"], 6.0);
        assert!(value["cache_status"]["cached_at"].is_string());
    }

    #[test]
    fn live_envelope_has_null_cache_fields() {
        let page = CachedPage::from_live(Page {
            page: 3,
            results: vec![json!({"id": 7})],
            total_pages: 10,
            total_results: 200,
        });

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["page"], 3);
        assert_eq!(value["cache_status"]["is_cached"], false);
        assert!(value["cache_status"]["cached_at"].is_null());
        assert!(value["cache_status"]["cache_age_hours"].is_null());
    }
}
