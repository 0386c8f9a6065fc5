use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use serde_json::Value;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tmdbcache_lib::{CachedPage, EntryInfo};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct TitleRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Released")]
    released: String,
    #[tabled(rename = "Rating")]
    rating: String,
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Written")]
    written: String,
    #[tabled(rename = "Age (h)")]
    age_hours: String,
    #[tabled(rename = "State")]
    state: String,
}

// -- Row builders --

fn build_title_rows(results: &[Value]) -> Vec<TitleRow> {
    results
        .iter()
        .map(|item| TitleRow {
            // movies carry `title`/`release_date`, TV carries `name`/`first_air_date`
            title: item["title"]
                .as_str()
                .or_else(|| item["name"].as_str())
                .unwrap_or("(untitled)")
                .to_string(),
            released: item["release_date"]
                .as_str()
                .or_else(|| item["first_air_date"].as_str())
                .unwrap_or("-")
                .to_string(),
            rating: item["vote_average"]
                .as_f64()
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

fn build_status_rows(entries: &[EntryInfo], window: Duration) -> Vec<StatusRow> {
    let now = Utc::now();
    entries
        .iter()
        .map(|entry| {
            let age_secs = now
                .signed_duration_since(entry.cached_at)
                .num_milliseconds() as f64
                / 1000.0;
            let stale = age_secs >= window.as_secs_f64();
            StatusRow {
                key: entry.key.clone(),
                written: entry.cached_at.to_rfc3339(),
                age_hours: format!("{:.1}", (age_secs.max(0.0)) / 3600.0),
                state: if stale { "stale" } else { "fresh" }.to_string(),
            }
        })
        .collect()
}

// -- Printers --

pub fn print_page(page: &CachedPage, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(page)?),
        OutputFormat::Table => {
            let mut table = Table::new(build_title_rows(&page.results));
            table.with(Style::markdown());
            println!("{}", table);
            match (&page.cache_status.cached_at, page.cache_status.cache_age_hours) {
                (Some(written), Some(age)) => eprintln!(
                    "page {} | served from cache, {:.1}h old (written {})",
                    page.page,
                    age,
                    written.to_rfc3339()
                ),
                _ => eprintln!("page {} | served live from TMDB", page.page),
            }
        }
    }
    Ok(())
}

pub fn print_status(entries: &[EntryInfo], window: Duration, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<Value> = build_status_rows(entries, window)
                .into_iter()
                .map(|row| {
                    serde_json::json!({
                        "key": row.key,
                        "written": row.written,
                        "age_hours": row.age_hours.parse::<f64>().unwrap_or(0.0),
                        "state": row.state,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new(build_status_rows(entries, window));
            table.with(Style::markdown());
            println!("{}", table);
        }
    }
    Ok(())
}
