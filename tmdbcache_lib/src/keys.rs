//! Cache-key derivation.
//!
//! Keys are flat lowercase strings, category plus disambiguating parameters
//! joined by underscores. Region codes are upper-cased so regional keys
//! stand out from the rest of the key space. Matching is exact and
//! case-sensitive everywhere.

use tmdb_api::{MediaKind, MovieCategory, TrendingWindow, TvCategory};

fn kind_slug(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "movies",
        MediaKind::Tv => "tv",
    }
}

/// Key for a trending listing, e.g. `trending_movies_day`.
pub fn trending(kind: MediaKind, window: TrendingWindow) -> String {
    format!("trending_{}_{}", kind_slug(kind), window.as_path())
}

/// Key for a curated movie list, e.g. `popular_movies`.
pub fn movie_list(category: MovieCategory) -> String {
    match category {
        MovieCategory::NowPlaying => "now_playing_movies",
        MovieCategory::Popular => "popular_movies",
        MovieCategory::Upcoming => "upcoming_movies",
        MovieCategory::TopRated => "top_rated_movies",
    }
    .to_string()
}

/// Key for a curated TV list, e.g. `popular_tv`.
pub fn tv_list(category: TvCategory) -> String {
    match category {
        TvCategory::Popular => "popular_tv",
        TvCategory::OnTheAir => "on_the_air_tv",
        TvCategory::TopRated => "top_rated_tv",
        TvCategory::AiringToday => "airing_today_tv",
    }
    .to_string()
}

/// Key for regionally popular movies, e.g. `regional_movies_US`.
pub fn regional_movies(region: &str) -> String {
    format!("regional_movies_{}", region.to_uppercase())
}

/// Key for regionally available TV, e.g. `regional_tv_FR`.
pub fn regional_tv(region: &str) -> String {
    format!("regional_tv_{}", region.to_uppercase())
}

/// Key for movies now playing in a region, e.g. `regional_now_playing_GB`.
pub fn regional_now_playing(region: &str) -> String {
    format!("regional_now_playing_{}", region.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trending_keys() {
        assert_eq!(
            trending(MediaKind::Movie, TrendingWindow::Day),
            "trending_movies_day"
        );
        assert_eq!(
            trending(MediaKind::Movie, TrendingWindow::Week),
            "trending_movies_week"
        );
        assert_eq!(trending(MediaKind::Tv, TrendingWindow::Day), "trending_tv_day");
        assert_eq!(
            trending(MediaKind::Tv, TrendingWindow::Week),
            "trending_tv_week"
        );
    }

    #[test]
    fn movie_list_keys() {
        assert_eq!(movie_list(MovieCategory::Popular), "popular_movies");
        assert_eq!(movie_list(MovieCategory::NowPlaying), "now_playing_movies");
        assert_eq!(movie_list(MovieCategory::Upcoming), "upcoming_movies");
        assert_eq!(movie_list(MovieCategory::TopRated), "top_rated_movies");
    }

    #[test]
    fn tv_list_keys() {
        assert_eq!(tv_list(TvCategory::Popular), "popular_tv");
        assert_eq!(tv_list(TvCategory::OnTheAir), "on_the_air_tv");
        assert_eq!(tv_list(TvCategory::TopRated), "top_rated_tv");
        assert_eq!(tv_list(TvCategory::AiringToday), "airing_today_tv");
    }

    #[test]
    fn regional_keys_uppercase_the_region() {
        assert_eq!(regional_movies("us"), "regional_movies_US");
        assert_eq!(regional_movies("US"), "regional_movies_US");
        assert_eq!(regional_tv("fr"), "regional_tv_FR");
        assert_eq!(regional_now_playing("gb"), "regional_now_playing_GB");
    }
}
