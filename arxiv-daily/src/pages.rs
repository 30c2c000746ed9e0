use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Supplies already-fetched listing HTML, one page per classification
pub trait PageSource {
    /// `Ok(None)` when no page was fetched for `category`
    fn load(&self, category: &str) -> Result<Option<String>>;
}

/// Reads `<dir>/<category>.html`, as left behind by the fetch step
pub struct DirectoryPageSource {
    dir: PathBuf,
}

impl DirectoryPageSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn page_path(&self, category: &str) -> PathBuf {
        self.dir.join(format!("{}.html", category))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PageSource for DirectoryPageSource {
    fn load(&self, category: &str) -> Result<Option<String>> {
        let path = self.page_path(category);
        match fs::read_to_string(&path) {
            Ok(html) => Ok(Some(html)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read listing page {:?}", path)),
        }
    }
}
