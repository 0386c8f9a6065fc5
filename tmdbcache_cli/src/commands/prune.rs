//! The `prune` subcommand: physically delete old cache rows.
//!
//! Reads never evict; stale rows linger until overwritten or pruned here.

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use tmdbcache_lib::SqliteStore;

/// Arguments for the `prune` subcommand.
#[derive(Args)]
pub struct PruneArgs {
    /// Delete entries older than this many hours (defaults to the freshness window)
    #[arg(long)]
    pub older_than_hours: Option<u64>,
}

pub fn run(args: &PruneArgs, store: &SqliteStore, window_hours: u64) -> Result<()> {
    let hours = args.older_than_hours.unwrap_or(window_hours);
    let cutoff = Utc::now() - chrono::Duration::hours(hours as i64);
    let removed = store.prune_older_than(cutoff)?;
    eprintln!("Pruned {} entries older than {}h", removed, hours);
    Ok(())
}
