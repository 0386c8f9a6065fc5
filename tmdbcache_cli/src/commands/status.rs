//! The `status` subcommand: list cached keys with age and freshness.

use std::time::Duration;

use anyhow::Result;
use tmdbcache_lib::SqliteStore;

use crate::output::{self, OutputFormat};

pub fn run(store: &SqliteStore, window: Duration, format: &OutputFormat) -> Result<()> {
    let entries = store.entries()?;
    if entries.is_empty() {
        eprintln!("cache is empty");
        return Ok(());
    }
    output::print_status(&entries, window, format)
}
