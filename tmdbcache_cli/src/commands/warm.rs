//! The `warm` subcommand: refresh page 1 of every homepage listing.
//!
//! This is the cron-job path: it fetches each listing fresh and overwrites
//! the cache entry whether or not it has expired. One failing endpoint does
//! not abort the rest of the run.

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tmdbcache_lib::{validation, CachedClient, Listing};

/// Arguments for the `warm` subcommand.
#[derive(Args)]
pub struct WarmArgs {
    /// Also warm regional listings for these 2-letter region codes
    #[arg(long = "region")]
    pub regions: Vec<String>,
}

pub async fn run(args: &WarmArgs, client: &CachedClient) -> Result<()> {
    let mut targets = Listing::homepage();
    for region in &args.regions {
        let region = validation::validate_region(region)?;
        targets.push(Listing::RegionalMovies(region.clone()));
        targets.push(Listing::RegionalTv(region.clone()));
        targets.push(Listing::RegionalNowPlaying(region));
    }

    eprintln!("Warming {} cache keys", targets.len());

    let pb = ProgressBar::new(targets.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>2}/{len:2} {msg}")
            .unwrap(),
    );

    let mut warmed = 0usize;
    let mut failed = 0usize;
    for listing in &targets {
        let key = listing.key();
        pb.set_message(key.clone());
        match client.warm(listing).await {
            Ok(count) => {
                pb.println(format!("cached {} items for key: {}", count, key));
                warmed += 1;
            }
            Err(e) => {
                pb.println(format!("failed to refresh {}: {}", key, e));
                failed += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    eprintln!("Warm complete: {} keys refreshed, {} failed", warmed, failed);
    if warmed == 0 && failed > 0 {
        anyhow::bail!("all {} warm fetches failed", failed);
    }
    Ok(())
}
