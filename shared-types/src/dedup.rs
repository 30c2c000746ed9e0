use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Outcome of a deduplication run, reported to the calling workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
pub enum DedupStatus {
    HasNewContent,
    NoNewContent,
    NoData,
    Error,
}

impl DedupStatus {
    pub fn continuation(&self) -> Continuation {
        match self {
            DedupStatus::HasNewContent => Continuation::Proceed,
            DedupStatus::NoNewContent | DedupStatus::NoData => Continuation::StopCleanly,
            DedupStatus::Error => Continuation::StopWithFailure,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DedupStatus::HasNewContent => "has_new_content",
            DedupStatus::NoNewContent => "no_new_content",
            DedupStatus::NoData => "no_data",
            DedupStatus::Error => "error",
        }
    }
}

impl fmt::Display for DedupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the downstream workflow should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum Continuation {
    Proceed,
    StopCleanly,
    StopWithFailure,
}

impl Continuation {
    /// Process exit code consumed by the workflow runner
    pub fn exit_code(&self) -> u8 {
        match self {
            Continuation::Proceed => 0,
            Continuation::StopCleanly => 1,
            Continuation::StopWithFailure => 2,
        }
    }
}

/// How today's records are compared against earlier days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
pub enum DedupPolicy {
    /// Drop records whose (id, version) repeats within today or across the history window.
    /// Replacements always survive.
    #[default]
    MultiDay,
    /// Keep today's store exactly as scraped.
    AcceptAll,
}

impl FromStr for DedupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "multi-day" | "multi_day" | "multiday" => Ok(DedupPolicy::MultiDay),
            "accept-all" | "accept_all" | "none" => Ok(DedupPolicy::AcceptAll),
            other => Err(format!("Unknown dedup policy: {}", other)),
        }
    }
}
