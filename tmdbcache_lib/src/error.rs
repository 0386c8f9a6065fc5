//! Error types for the library layer.

use std::fmt;

use crate::store::StoreError;

/// Errors produced by the library layer, wrapping upstream API errors and
/// adding storage and input validation failures.
///
/// Cache read/write failures never surface here: the cache degrades to a
/// miss on read errors and swallows write errors, so the only failures a
/// caller sees come from the upstream fetch or from its own input.
#[derive(Debug)]
pub enum TmdbCacheError {
    /// An error from the underlying TMDB API client.
    Api(tmdb_api::Error),
    /// A direct storage operation failed (maintenance paths, not cached reads).
    Store(StoreError),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for TmdbCacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Store(e) => write!(f, "Store error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for TmdbCacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tmdb_api::Error> for TmdbCacheError {
    fn from(e: tmdb_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<StoreError> for TmdbCacheError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
