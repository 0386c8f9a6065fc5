//! The `tv` subcommand: curated TV lists through the cache.

use anyhow::{anyhow, Result};
use clap::Args;
use tmdbcache_lib::{CachedClient, TvCategory};

use crate::output::{self, OutputFormat};

/// Arguments for the `tv` subcommand.
#[derive(Args)]
pub struct TvArgs {
    /// Category: popular, on_the_air, top_rated, or airing_today
    pub category: String,

    /// Page number (only page 1 is served from the cache)
    #[arg(long, default_value = "1")]
    pub page: i64,
}

pub async fn run(args: &TvArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let category: TvCategory = args.category.parse().map_err(|e: String| anyhow!(e))?;
    let page = client.tv_list(category, args.page).await?;
    output::print_page(&page, format)
}
