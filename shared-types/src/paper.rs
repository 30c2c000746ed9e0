use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use ts_rs::TS;

/// Version assumed for records whose listing link carried no explicit version
pub const DEFAULT_VERSION: &str = "v1";

/// Listing section a paper was announced under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    New,
    Cross,
    Replacement,
    #[default]
    Other,
}

/// Stored values are matched case-insensitively; `repl` is the legacy name
/// for replacements and anything unrecognised (or null) reads as `other`.
impl<'de> Deserialize<'de> for Section {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Section::from_stored).unwrap_or_default())
    }
}

impl Section {
    /// Classify a free-text listing heading such as "New submissions (showing 12 of 12 entries)"
    pub fn from_heading(heading: &str) -> Self {
        let heading = heading.to_lowercase();

        if heading.contains("new submission") {
            Section::New
        } else if heading.contains("cross submission") {
            Section::Cross
        } else if heading.contains("replacement") {
            Section::Replacement
        } else {
            Section::Other
        }
    }

    pub fn from_stored(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "new" => Section::New,
            "cross" => Section::Cross,
            "replacement" | "repl" => Section::Replacement,
            _ => Section::Other,
        }
    }

    /// Rank used when ordering records within one source
    pub fn priority(&self) -> u8 {
        match self {
            Section::New => 0,
            Section::Cross => 1,
            Section::Replacement => 2,
            Section::Other => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::New => "new",
            Section::Cross => "cross",
            Section::Replacement => "replacement",
            Section::Other => "other",
        }
    }
}

/// One announced paper, as persisted in the daily store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct PaperRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub version: Option<String>,
    #[serde(rename = "abs")]
    pub abstract_url: String,
    #[serde(rename = "pdf")]
    pub document_url: String,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub section: Section,
}

impl PaperRecord {
    /// Build a record from its abstract link; the document link is derived from it.
    pub fn new(
        id: impl Into<String>,
        version: Option<String>,
        abstract_url: impl Into<String>,
        categories: BTreeSet<String>,
        section: Section,
    ) -> Self {
        let abstract_url = abstract_url.into();
        let document_url = document_url_for(&abstract_url);

        Self {
            id: id.into(),
            version,
            abstract_url,
            document_url,
            categories,
            section,
        }
    }

    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            id: self.id.clone(),
            version: self
                .version
                .clone()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        }
    }

    pub fn is_replacement(&self) -> bool {
        self.section == Section::Replacement
    }
}

/// Identity used for duplicate detection: categories and links are not part of it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DedupKey {
    pub id: String,
    pub version: String,
}

pub fn document_url_for(abstract_url: &str) -> String {
    abstract_url.replacen("/abs/", "/pdf/", 1)
}
