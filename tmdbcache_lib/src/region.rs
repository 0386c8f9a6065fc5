//! Viewer region detection for "Trending Near You" listings.
//!
//! Looks up a country code for an IP address with a short timeout. A lookup
//! that times out or fails in any way yields the default region instead of
//! an error, so region detection can sit on the request path without ever
//! slowing it down meaningfully.

use std::time::Duration;

use serde::Deserialize;

/// Region used when the lookup cannot produce one.
pub const DEFAULT_REGION: &str = "US";

/// Per-lookup timeout. Timeout means "use the default", not failure.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Deserialize)]
struct GeoResponse {
    #[serde(rename = "countryCode")]
    country_code: String,
}

/// Resolves viewer regions from IP addresses.
pub struct RegionLocator {
    /// Base URL of the geolocation service. Defaults to `http://ip-api.com`.
    base_url: String,
}

impl Default for RegionLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionLocator {
    pub fn new() -> Self {
        Self {
            base_url: "http://ip-api.com".to_string(),
        }
    }

    /// Creates a locator with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the 2-letter country code for `ip`, or [`DEFAULT_REGION`] on
    /// any failure.
    pub async fn locate(&self, ip: &str) -> String {
        match self.try_locate(ip).await {
            Some(region) => region,
            None => {
                tracing::debug!("region lookup for {} fell back to {}", ip, DEFAULT_REGION);
                DEFAULT_REGION.to_string()
            }
        }
    }

    async fn try_locate(&self, ip: &str) -> Option<String> {
        let client = reqwest::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .ok()?;
        let resp = client
            .get(format!("{}/json/{}", self.base_url, ip))
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?;
        let geo: GeoResponse = resp.json().await.ok()?;
        let region = geo.country_code.trim().to_uppercase();
        if region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(region)
        } else {
            None
        }
    }
}
