use super::{RecordStore, StoreError};
use chrono::NaiveDate;
use shared_types::PaperRecord;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Newline-delimited JSON store: `<root>/<YYYY-MM-DD>.jsonl`, one record per line
pub struct JsonlStore {
    root: PathBuf,
}

impl JsonlStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn io_error(path: &Path, source: io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn write_records(path: &Path, records: &[PaperRecord]) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for record in records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }
}

impl RecordStore for JsonlStore {
    fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.root.join(format!("{}.jsonl", date.format("%Y-%m-%d")))
    }

    fn load_day(&self, date: NaiveDate) -> Result<Option<Vec<PaperRecord>>, StoreError> {
        let path = self.day_path(date);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::io_error(&path, e)),
        };

        let mut records = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(line).map_err(|source| StoreError::Malformed {
                path: path.clone(),
                line: index + 1,
                source,
            })?;
            records.push(record);
        }

        Ok(Some(records))
    }

    fn save_day(&self, date: NaiveDate, records: &[PaperRecord]) -> Result<(), StoreError> {
        let path = self.day_path(date);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Self::io_error(parent, e))?;
            }
        }

        // Whole-file replace: write a sibling, then rename over the day's file
        let tmp_path = path.with_extension("jsonl.tmp");
        if let Err(e) = Self::write_records(&tmp_path, records) {
            let _ = fs::remove_file(&tmp_path);
            return Err(Self::io_error(&tmp_path, e));
        }
        fs::rename(&tmp_path, &path).map_err(|e| Self::io_error(&path, e))
    }

    fn remove_day(&self, date: NaiveDate) -> Result<(), StoreError> {
        let path = self.day_path(date);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }
}
