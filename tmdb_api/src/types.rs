//! Response envelope and endpoint enums for the TMDB v3 API.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a TMDB listing response.
///
/// Items are kept as raw JSON so responses proxy through unmodified; only the
/// pagination fields are typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub page: i64,
    pub results: Vec<Value>,
    pub total_pages: i64,
    pub total_results: i64,
}

/// Media kind for trending lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Path segment used by the TMDB API.
    pub fn as_path(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "movies" => Ok(MediaKind::Movie),
            "tv" => Ok(MediaKind::Tv),
            _ => Err(format!("unknown media kind '{}'. Valid values: movie, tv", s)),
        }
    }
}

/// Time window for trending lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendingWindow {
    Day,
    Week,
}

impl TrendingWindow {
    pub fn as_path(&self) -> &'static str {
        match self {
            TrendingWindow::Day => "day",
            TrendingWindow::Week => "week",
        }
    }
}

impl FromStr for TrendingWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(TrendingWindow::Day),
            "week" => Ok(TrendingWindow::Week),
            _ => Err(format!(
                "unknown time window '{}'. Valid values: day, week",
                s
            )),
        }
    }
}

/// Curated movie list categories exposed by the TMDB API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieCategory {
    NowPlaying,
    Popular,
    Upcoming,
    TopRated,
}

impl MovieCategory {
    pub fn as_path(&self) -> &'static str {
        match self {
            MovieCategory::NowPlaying => "now_playing",
            MovieCategory::Popular => "popular",
            MovieCategory::Upcoming => "upcoming",
            MovieCategory::TopRated => "top_rated",
        }
    }
}

impl FromStr for MovieCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "now_playing" | "now-playing" => Ok(MovieCategory::NowPlaying),
            "popular" => Ok(MovieCategory::Popular),
            "upcoming" => Ok(MovieCategory::Upcoming),
            "top_rated" | "top-rated" => Ok(MovieCategory::TopRated),
            _ => Err(format!(
                "unknown movie category '{}'. Valid values: now_playing, popular, upcoming, top_rated",
                s
            )),
        }
    }
}

/// Curated TV list categories exposed by the TMDB API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvCategory {
    Popular,
    OnTheAir,
    TopRated,
    AiringToday,
}

impl TvCategory {
    pub fn as_path(&self) -> &'static str {
        match self {
            TvCategory::Popular => "popular",
            TvCategory::OnTheAir => "on_the_air",
            TvCategory::TopRated => "top_rated",
            TvCategory::AiringToday => "airing_today",
        }
    }
}

impl FromStr for TvCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "popular" => Ok(TvCategory::Popular),
            "on_the_air" | "on-the-air" => Ok(TvCategory::OnTheAir),
            "top_rated" | "top-rated" => Ok(TvCategory::TopRated),
            "airing_today" | "airing-today" => Ok(TvCategory::AiringToday),
            _ => Err(format!(
                "unknown TV category '{}'. Valid values: popular, on_the_air, top_rated, airing_today",
                s
            )),
        }
    }
}
