pub mod config;
pub mod dedup;
pub mod logging;
pub mod pages;
pub mod pipeline;
pub mod storage;

pub use config::DailyConfig;
pub use dedup::{filter_new, DedupEngine, DedupReport, DedupStats};
pub use pages::{DirectoryPageSource, PageSource};
pub use pipeline::{run_scrape, ScrapeSummary};
pub use storage::{JsonlStore, RecordStore, StoreError};
