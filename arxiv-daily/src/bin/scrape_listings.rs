use anyhow::{Context, Result};
use arxiv_daily::logging::init_tracing;
use arxiv_daily::{run_scrape, DailyConfig, DirectoryPageSource, JsonlStore};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Extract today's listing pages into the day's JSON Lines store
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config file; defaults to the per-user config when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated categories, e.g. "math.QA,math.RT"
    #[arg(long)]
    categories: Option<String>,

    #[arg(long)]
    pages_dir: Option<PathBuf>,

    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Run date as YYYY-MM-DD; defaults to today (UTC)
    #[arg(long)]
    date: Option<NaiveDate>,

    #[arg(long)]
    log_file_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = init_tracing(args.log_file_path.as_deref());

    let (mut config, config_path) =
        DailyConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(p) = &config_path {
        info!("Loaded config from {:?}", p);
    }

    if let Some(categories) = args.categories {
        config.sources.categories = categories;
    }
    if let Some(pages_dir) = args.pages_dir {
        config.sources.pages_dir = pages_dir;
    }
    if let Some(data_dir) = args.data_dir {
        config.store.data_dir = data_dir;
    }

    let date = args.date.unwrap_or_else(|| chrono::Utc::now().date_naive());
    let pages = DirectoryPageSource::new(&config.sources.pages_dir);
    let store = JsonlStore::new(&config.store.data_dir);

    info!(
        "Scraping {} for {} from {:?}",
        config.sources.categories,
        date,
        pages.dir()
    );

    let summary = run_scrape(&config.sources, &pages, &store, date)?;
    info!(
        "Done: {} records from {:?}, missing {:?}",
        summary.records, summary.sources, summary.missing_sources
    );

    Ok(())
}
