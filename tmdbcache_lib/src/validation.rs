use crate::error::TmdbCacheError;

/// Validate page number (must be >= 1).
pub fn validate_page(page: i64) -> Result<i64, TmdbCacheError> {
    if page < 1 {
        return Err(TmdbCacheError::InvalidInput(
            "page must be >= 1".to_string(),
        ));
    }
    Ok(page)
}

/// Validate a region code: 2-letter ISO 3166-1 code, normalized to uppercase.
pub fn validate_region(input: &str) -> Result<String, TmdbCacheError> {
    let trimmed = input.trim();
    if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(trimmed.to_uppercase())
    } else {
        Err(TmdbCacheError::InvalidInput(format!(
            "invalid region code '{}'. Expected 2-letter ISO code (e.g., US, FR)",
            input
        )))
    }
}
