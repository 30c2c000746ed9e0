use config::{Config, ConfigError, Environment, File};
use extractors::sources::{
    priority_table, DEFAULT_CATEGORIES, DEFAULT_LISTING_BASE_URL, DEFAULT_PRIORITY_ORDER,
};
use serde::{Deserialize, Serialize};
use shared_types::DedupPolicy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::dedup::DEFAULT_HISTORY_DAYS;

/// Legacy variable holding the comma-separated category list
pub const CATEGORIES_ENV: &str = "CATEGORIES";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct DailyConfig {
    pub sources: SourcesConfig,
    pub store: StoreConfig,
    pub dedup: DedupConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SourcesConfig {
    /// Comma-separated classification list, e.g. `"math.QA,math.RT"`
    pub categories: String,
    pub listing_base_url: String,
    /// Directory holding fetched listing pages, one `<category>.html` per source
    pub pages_dir: PathBuf,
    /// Categories ranked first to last; unlisted categories come after all of them
    pub priority_order: Vec<String>,
}

impl SourcesConfig {
    pub fn priority_table(&self) -> HashMap<String, u32> {
        priority_table(&self.priority_order)
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.to_string(),
            listing_base_url: DEFAULT_LISTING_BASE_URL.to_string(),
            pages_dir: PathBuf::from("pages"),
            priority_order: DEFAULT_PRIORITY_ORDER.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct DedupConfig {
    pub history_days: u32,
    pub policy: DedupPolicy,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            history_days: DEFAULT_HISTORY_DAYS,
            policy: DedupPolicy::MultiDay,
        }
    }
}

impl DailyConfig {
    /// Load from `path` (or the per-user config file when present), then
    /// `ARXIV_DAILY_<SECTION>__<KEY>` variables, then the legacy `CATEGORIES` variable.
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::Message(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                Some(p.to_path_buf())
            }
            None => Some(get_config_path()).filter(|p| p.exists()),
        };

        let mut builder = Config::builder();
        if let Some(p) = &config_path {
            builder = builder.add_source(File::from(p.clone()));
        }
        builder = builder.add_source(
            Environment::with_prefix("ARXIV_DAILY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: DailyConfig = builder.build()?.try_deserialize()?;

        if let Ok(categories) = std::env::var(CATEGORIES_ENV) {
            if !categories.trim().is_empty() {
                config.sources.categories = categories;
            }
        }

        Ok((config, config_path))
    }

    /// Parse a TOML document on its own, without files or environment
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(content, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("arxiv-daily").join("config.toml")
    } else {
        PathBuf::from("config.toml")
    }
}
