//! HTTP client for the TMDB v3 API.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::ListQuery,
    types::{MediaKind, MovieCategory, Page, TrendingWindow, TvCategory},
    Error,
};

/// Request timeout for TMDB API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the TMDB v3 API.
///
/// Authenticates with a bearer token (the TMDB "API Read Access Token") so
/// the key never leaves the backend. All listing endpoints return [`Page`]
/// with the result items left as raw JSON.
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API. Defaults to `https://api.themoviedb.org/3`.
    base_api_url: String,
    bearer_token: String,
}

impl Client {
    /// Creates a new client pointing at the production TMDB API.
    pub fn new(bearer_token: impl Into<String>) -> Result<Self, Error> {
        Self::with_base_url("https://api.themoviedb.org/3", bearer_token)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, bearer_token: impl Into<String>) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        Ok(Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: bearer_token.into(),
        })
    }

    fn get_url(&self, path: &str, query: &ListQuery) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(query.add_to_url(&url))
    }

    async fn get<T>(&self, path: &str, query: &ListQuery, extra: &[(&str, &str)]) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let mut url = self.get_url(path, query)?;
        for (name, value) in extra {
            url.query_pairs_mut().append_pair(name, value);
        }

        let resp = self
            .http
            .get(url)
            .header("accept", "application/json")
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let parsed = serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::RequestFailed
        })?;

        Ok(parsed)
    }

    /// Fetches trending content for the given media kind and time window.
    pub async fn trending(
        &self,
        kind: MediaKind,
        window: TrendingWindow,
        query: &ListQuery,
    ) -> Result<Page, Error> {
        self.get(
            format!("/trending/{}/{}", kind.as_path(), window.as_path()).as_str(),
            query,
            &[],
        )
        .await
    }

    /// Fetches a curated movie list (now playing, popular, upcoming, top rated).
    pub async fn movie_list(
        &self,
        category: MovieCategory,
        query: &ListQuery,
    ) -> Result<Page, Error> {
        self.get(format!("/movie/{}", category.as_path()).as_str(), query, &[])
            .await
    }

    /// Fetches a curated TV list (popular, on the air, top rated, airing today).
    pub async fn tv_list(&self, category: TvCategory, query: &ListQuery) -> Result<Page, Error> {
        self.get(format!("/tv/{}", category.as_path()).as_str(), query, &[])
            .await
    }

    /// Fetches movies popular in a region via the discover endpoint.
    pub async fn discover_movies(&self, region: &str, query: &ListQuery) -> Result<Page, Error> {
        self.get(
            "/discover/movie",
            query,
            &[("region", region), ("sort_by", "popularity.desc")],
        )
        .await
    }

    /// Fetches TV shows watchable in a region via the discover endpoint.
    pub async fn discover_tv(&self, region: &str, query: &ListQuery) -> Result<Page, Error> {
        self.get(
            "/discover/tv",
            query,
            &[("watch_region", region), ("sort_by", "popularity.desc")],
        )
        .await
    }

    /// Fetches movies now playing in theaters for a region.
    pub async fn now_playing_in_region(
        &self,
        region: &str,
        query: &ListQuery,
    ) -> Result<Page, Error> {
        self.get("/movie/now_playing", query, &[("region", region)])
            .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        format!("{}...[truncated]", &body[..MAX])
    }
}
