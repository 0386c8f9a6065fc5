//! The `movies` subcommand: curated movie lists through the cache.

use anyhow::{anyhow, Result};
use clap::Args;
use tmdbcache_lib::{CachedClient, MovieCategory};

use crate::output::{self, OutputFormat};

/// Arguments for the `movies` subcommand.
#[derive(Args)]
pub struct MoviesArgs {
    /// Category: now_playing, popular, upcoming, or top_rated
    pub category: String,

    /// Page number (only page 1 is served from the cache)
    #[arg(long, default_value = "1")]
    pub page: i64,
}

pub async fn run(args: &MoviesArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let category: MovieCategory = args.category.parse().map_err(|e: String| anyhow!(e))?;
    let page = client.movie_list(category, args.page).await?;
    output::print_page(&page, format)
}
