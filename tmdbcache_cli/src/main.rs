mod commands;
mod output;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tmdbcache_lib::{CachedClient, ResponseCache, SqliteStore};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "tmdbcache")]
#[command(about = "Serve and manage cached TMDB homepage listings")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// SQLite cache database path
    #[arg(long, default_value = "tmdb_cache.db", global = true)]
    db: PathBuf,

    /// Freshness window in hours; entries at least this old are refetched
    #[arg(long, default_value = "12", global = true)]
    window_hours: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trending movies or TV for a time window
    Trending(commands::trending::TrendingArgs),
    /// Curated movie lists (now_playing, popular, upcoming, top_rated)
    Movies(commands::movies::MoviesArgs),
    /// Curated TV lists (popular, on_the_air, top_rated, airing_today)
    Tv(commands::tv::TvArgs),
    /// Regionally popular content ("Trending Near You")
    Regional(commands::regional::RegionalArgs),
    /// Fetch and cache page 1 of every homepage listing
    Warm(commands::warm::WarmArgs),
    /// Show cached keys with their age and freshness
    Status,
    /// Delete entries older than a cutoff
    Prune(commands::prune::PruneArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tmdbcache=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let store = Arc::new(SqliteStore::open(&cli.db)?);
    store.init()?;
    let window = Duration::from_secs(cli.window_hours * 3600);

    match &cli.command {
        Commands::Trending(args) => {
            let client = build_client(store, window)?;
            commands::trending::run(args, &client, &format).await?
        }
        Commands::Movies(args) => {
            let client = build_client(store, window)?;
            commands::movies::run(args, &client, &format).await?
        }
        Commands::Tv(args) => {
            let client = build_client(store, window)?;
            commands::tv::run(args, &client, &format).await?
        }
        Commands::Regional(args) => {
            let client = build_client(store, window)?;
            commands::regional::run(args, &client, &format).await?
        }
        Commands::Warm(args) => {
            let client = build_client(store, window)?;
            commands::warm::run(args, &client).await?
        }
        Commands::Status => commands::status::run(&store, window, &format)?,
        Commands::Prune(args) => commands::prune::run(args, &store, cli.window_hours)?,
    }

    Ok(())
}

/// Builds the cached TMDB client. Reading and maintenance subcommands do not
/// need the API token, so this only runs for serving commands.
fn build_client(store: Arc<SqliteStore>, window: Duration) -> Result<CachedClient> {
    let token = std::env::var("TMDB_BEARER_TOKEN")
        .context("TMDB_BEARER_TOKEN is not set (put it in the environment or a .env file)")?;
    let api = match std::env::var("TMDB_BASE_URL") {
        Ok(base) => tmdbcache_lib::tmdb_api::Client::with_base_url(&base, token)?,
        Err(_) => tmdbcache_lib::tmdb_api::Client::new(token)?,
    };
    let cache = ResponseCache::new(store, window);
    Ok(CachedClient::new(api, cache))
}
