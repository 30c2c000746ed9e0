pub mod jsonl_storage;

pub use jsonl_storage::JsonlStore;

use chrono::NaiveDate;
use shared_types::PaperRecord;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record in {path:?} at line {line}: {source}")]
    Malformed {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Per-day record sets, one per calendar date
pub trait RecordStore {
    fn day_path(&self, date: NaiveDate) -> PathBuf;

    /// `Ok(None)` when nothing was stored for that day
    fn load_day(&self, date: NaiveDate) -> Result<Option<Vec<PaperRecord>>, StoreError>;

    /// Replace the whole day with `records`
    fn save_day(&self, date: NaiveDate, records: &[PaperRecord]) -> Result<(), StoreError>;

    fn remove_day(&self, date: NaiveDate) -> Result<(), StoreError>;
}
