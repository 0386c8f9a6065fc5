//! The `trending` subcommand: trending movies or TV through the cache.

use anyhow::{anyhow, Result};
use clap::Args;
use tmdbcache_lib::{CachedClient, MediaKind, TrendingWindow};

use crate::output::{self, OutputFormat};

/// Arguments for the `trending` subcommand.
#[derive(Args)]
pub struct TrendingArgs {
    /// Media kind: movie or tv
    pub kind: String,

    /// Time window: day or week
    #[arg(default_value = "day")]
    pub window: String,

    /// Page number (only page 1 is served from the cache)
    #[arg(long, default_value = "1")]
    pub page: i64,
}

pub async fn run(args: &TrendingArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let kind: MediaKind = args.kind.parse().map_err(|e: String| anyhow!(e))?;
    let window: TrendingWindow = args.window.parse().map_err(|e: String| anyhow!(e))?;
    let page = client.trending(kind, window, args.page).await?;
    output::print_page(&page, format)
}
