use arxiv_daily::logging::init_tracing;
use arxiv_daily::{DailyConfig, DedupEngine, JsonlStore};
use chrono::NaiveDate;
use clap::Parser;
use shared_types::{DedupPolicy, DedupStatus};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Deduplicate today's store against recent days.
///
/// Exit code: 0 new content, 1 nothing new or no data, 2 error.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Number of earlier days whose keys count as already seen
    #[arg(long)]
    history_days: Option<u32>,

    /// "multi-day" or "accept-all"
    #[arg(long)]
    policy: Option<DedupPolicy>,

    /// Run date as YYYY-MM-DD; defaults to today (UTC)
    #[arg(long)]
    date: Option<NaiveDate>,

    #[arg(long)]
    log_file_path: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _guard = init_tracing(args.log_file_path.as_deref());

    let mut config = match DailyConfig::load(args.config.as_deref()) {
        Ok((config, _)) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::from(DedupStatus::Error.continuation().exit_code());
        }
    };

    if let Some(data_dir) = args.data_dir {
        config.store.data_dir = data_dir;
    }
    if let Some(history_days) = args.history_days {
        config.dedup.history_days = history_days;
    }
    if let Some(policy) = args.policy {
        config.dedup.policy = policy;
    }

    let today = args.date.unwrap_or_else(|| chrono::Utc::now().date_naive());
    let store = JsonlStore::new(&config.store.data_dir);
    let engine = DedupEngine::new(&store, config.dedup.history_days, config.dedup.policy);

    let report = engine.run(today);
    let continuation = report.status.continuation();
    info!("status={} next={:?}", report.status, continuation);

    ExitCode::from(continuation.exit_code())
}
