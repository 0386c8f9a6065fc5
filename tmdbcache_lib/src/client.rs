//! Get-or-fetch composition over the cache and the TMDB client.
//!
//! The cache itself never talks to TMDB; this layer owns the upstream fetch
//! and hands fetched data back to the cache, mirroring how the serving routes
//! use it. The first-page-only rule lives here too: only page 1 of a listing
//! is ever looked up or stored, deeper pages always go to upstream live.

use serde_json::Value;

use tmdb_api::{Client, ListQuery, MediaKind, MovieCategory, Page, TrendingWindow, TvCategory};

use crate::cache::{Lookup, ResponseCache};
use crate::envelope::CachedPage;
use crate::error::TmdbCacheError;
use crate::{keys, validation};

/// A cacheable homepage listing, identifying one cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Trending(MediaKind, TrendingWindow),
    Movies(MovieCategory),
    Tv(TvCategory),
    /// Regionally popular movies; region code upper-case.
    RegionalMovies(String),
    /// Regionally available TV; region code upper-case.
    RegionalTv(String),
    /// Now playing in theaters for a region; region code upper-case.
    RegionalNowPlaying(String),
}

impl Listing {
    /// The cache key this listing is stored under.
    pub fn key(&self) -> String {
        match self {
            Listing::Trending(kind, window) => keys::trending(*kind, *window),
            Listing::Movies(category) => keys::movie_list(*category),
            Listing::Tv(category) => keys::tv_list(*category),
            Listing::RegionalMovies(region) => keys::regional_movies(region),
            Listing::RegionalTv(region) => keys::regional_tv(region),
            Listing::RegionalNowPlaying(region) => keys::regional_now_playing(region),
        }
    }

    /// The twelve listings the homepage serves, in warm order.
    pub fn homepage() -> Vec<Listing> {
        vec![
            Listing::Trending(MediaKind::Movie, TrendingWindow::Day),
            Listing::Trending(MediaKind::Movie, TrendingWindow::Week),
            Listing::Movies(MovieCategory::Popular),
            Listing::Movies(MovieCategory::NowPlaying),
            Listing::Movies(MovieCategory::Upcoming),
            Listing::Movies(MovieCategory::TopRated),
            Listing::Trending(MediaKind::Tv, TrendingWindow::Day),
            Listing::Trending(MediaKind::Tv, TrendingWindow::Week),
            Listing::Tv(TvCategory::Popular),
            Listing::Tv(TvCategory::OnTheAir),
            Listing::Tv(TvCategory::TopRated),
            Listing::Tv(TvCategory::AiringToday),
        ]
    }
}

/// TMDB client wrapper that serves listings through the response cache.
pub struct CachedClient {
    inner: Client,
    cache: ResponseCache,
}

impl CachedClient {
    pub fn new(inner: Client, cache: ResponseCache) -> Self {
        Self { inner, cache }
    }

    /// The cache behind this client (for stats and inspection).
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    async fn fetch_page(
        &self,
        listing: &Listing,
        query: &ListQuery,
    ) -> Result<Page, tmdb_api::Error> {
        match listing {
            Listing::Trending(kind, window) => self.inner.trending(*kind, *window, query).await,
            Listing::Movies(category) => self.inner.movie_list(*category, query).await,
            Listing::Tv(category) => self.inner.tv_list(*category, query).await,
            Listing::RegionalMovies(region) => self.inner.discover_movies(region, query).await,
            Listing::RegionalTv(region) => self.inner.discover_tv(region, query).await,
            Listing::RegionalNowPlaying(region) => {
                self.inner.now_playing_in_region(region, query).await
            }
        }
    }

    /// Serves one page of a listing, from the cache when it can.
    ///
    /// Page 1 consults the cache first and, after a live fetch, stores the
    /// item list (pagination metadata is not cached; cached responses render
    /// as a synthetic page 1). Deeper pages bypass the cache entirely.
    /// Upstream failures propagate; cache failures never do.
    pub async fn listing(&self, listing: &Listing, page: i64) -> Result<CachedPage, TmdbCacheError> {
        let page = validation::validate_page(page)?;
        let key = listing.key();

        if page == 1 {
            if let Lookup::Hit(hit) = self.cache.get(&key) {
                return Ok(CachedPage::from_hit(hit));
            }
        }

        let query = ListQuery::default().with_page(page);
        let live = self.fetch_page(listing, &query).await?;
        if page == 1 {
            self.cache.put(&key, &Value::Array(live.results.clone()));
        }
        Ok(CachedPage::from_live(live))
    }

    /// Trending movies or TV for a time window.
    pub async fn trending(
        &self,
        kind: MediaKind,
        window: TrendingWindow,
        page: i64,
    ) -> Result<CachedPage, TmdbCacheError> {
        self.listing(&Listing::Trending(kind, window), page).await
    }

    /// A curated movie list.
    pub async fn movie_list(
        &self,
        category: MovieCategory,
        page: i64,
    ) -> Result<CachedPage, TmdbCacheError> {
        self.listing(&Listing::Movies(category), page).await
    }

    /// A curated TV list.
    pub async fn tv_list(
        &self,
        category: TvCategory,
        page: i64,
    ) -> Result<CachedPage, TmdbCacheError> {
        self.listing(&Listing::Tv(category), page).await
    }

    /// Movies popular in a region ("Trending Near You").
    pub async fn regional_movies(
        &self,
        region: &str,
        page: i64,
    ) -> Result<CachedPage, TmdbCacheError> {
        let region = validation::validate_region(region)?;
        self.listing(&Listing::RegionalMovies(region), page).await
    }

    /// TV shows watchable in a region.
    pub async fn regional_tv(&self, region: &str, page: i64) -> Result<CachedPage, TmdbCacheError> {
        let region = validation::validate_region(region)?;
        self.listing(&Listing::RegionalTv(region), page).await
    }

    /// Movies now playing in theaters for a region.
    pub async fn regional_now_playing(
        &self,
        region: &str,
        page: i64,
    ) -> Result<CachedPage, TmdbCacheError> {
        let region = validation::validate_region(region)?;
        self.listing(&Listing::RegionalNowPlaying(region), page)
            .await
    }

    /// Fetches page 1 of a listing fresh from upstream and overwrites the
    /// cache entry, skipping the freshness check. Returns the item count.
    ///
    /// This is the warm-job path: it refreshes entries whether or not they
    /// have expired.
    pub async fn warm(&self, listing: &Listing) -> Result<usize, TmdbCacheError> {
        let live = self.fetch_page(listing, &ListQuery::default()).await?;
        let count = live.results.len();
        self.cache.put(&listing.key(), &Value::Array(live.results));
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_keys_match_key_module() {
        assert_eq!(
            Listing::Trending(MediaKind::Movie, TrendingWindow::Day).key(),
            "trending_movies_day"
        );
        assert_eq!(Listing::Movies(MovieCategory::Popular).key(), "popular_movies");
        assert_eq!(Listing::Tv(TvCategory::AiringToday).key(), "airing_today_tv");
        assert_eq!(
            Listing::RegionalMovies("US".to_string()).key(),
            "regional_movies_US"
        );
    }

    #[test]
    fn homepage_covers_twelve_distinct_keys() {
        let listings = Listing::homepage();
        assert_eq!(listings.len(), 12);
        let mut keys: Vec<String> = listings.iter().map(|l| l.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 12);
    }
}
