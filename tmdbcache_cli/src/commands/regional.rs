//! The `regional` subcommand: "Trending Near You" listings.
//!
//! The region can be passed directly, geolocated from an IP (with the
//! locator's 1-second timeout and US fallback), or defaulted.

use anyhow::{anyhow, Result};
use clap::Args;
use tmdbcache_lib::region::DEFAULT_REGION;
use tmdbcache_lib::{CachedClient, RegionLocator};

use crate::output::{self, OutputFormat};

/// Arguments for the `regional` subcommand.
#[derive(Args)]
pub struct RegionalArgs {
    /// Content kind: movie, tv, or now-playing
    #[arg(long, default_value = "movie")]
    pub kind: String,

    /// 2-letter region code (skips geolocation)
    #[arg(long)]
    pub region: Option<String>,

    /// IP address to geolocate when no region is given
    #[arg(long)]
    pub ip: Option<String>,

    /// Page number (only page 1 is served from the cache)
    #[arg(long, default_value = "1")]
    pub page: i64,
}

pub async fn run(args: &RegionalArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let region = match &args.region {
        Some(region) => region.clone(),
        None => match &args.ip {
            Some(ip) => RegionLocator::new().locate(ip).await,
            None => DEFAULT_REGION.to_string(),
        },
    };

    let page = match args.kind.as_str() {
        "movie" | "movies" => client.regional_movies(&region, args.page).await?,
        "tv" => client.regional_tv(&region, args.page).await?,
        "now-playing" | "now_playing" => client.regional_now_playing(&region, args.page).await?,
        other => {
            return Err(anyhow!(
                "unknown regional kind '{}'. Valid values: movie, tv, now-playing",
                other
            ))
        }
    };
    output::print_page(&page, format)
}
