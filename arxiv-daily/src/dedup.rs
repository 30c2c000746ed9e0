use crate::storage::{RecordStore, StoreError};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use shared_types::{DedupKey, DedupPolicy, DedupStatus, PaperRecord};
use std::collections::{BTreeMap, HashSet};
use tracing::{error, info, warn};

pub const DEFAULT_HISTORY_DAYS: u32 = 7;

/// Counters for one deduplication pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DedupStats {
    pub total: usize,
    pub kept: usize,
    pub replacements_kept: usize,
    pub duplicates_today: usize,
    pub duplicates_history: usize,
    pub history_keys: usize,
    pub kept_by_section: BTreeMap<String, usize>,
}

#[derive(Debug, Clone)]
pub struct DedupReport {
    pub status: DedupStatus,
    pub stats: DedupStats,
}

impl DedupReport {
    fn new(status: DedupStatus, stats: DedupStats) -> Self {
        Self { status, stats }
    }
}

/// Keep replacements unconditionally; drop other records whose key already
/// appeared earlier today or anywhere in `history`. Order is preserved.
pub fn filter_new(
    records: Vec<PaperRecord>,
    history: &HashSet<DedupKey>,
) -> (Vec<PaperRecord>, DedupStats) {
    let mut stats = DedupStats {
        total: records.len(),
        history_keys: history.len(),
        ..Default::default()
    };
    let mut seen_today = HashSet::new();
    let mut kept = Vec::new();

    for paper in records {
        if paper.is_replacement() {
            stats.replacements_kept += 1;
            kept.push(paper);
            continue;
        }

        let key = paper.dedup_key();
        if !seen_today.insert(key.clone()) {
            stats.duplicates_today += 1;
            continue;
        }

        // same version seen before is a repeat; a new version is new content
        if history.contains(&key) {
            stats.duplicates_history += 1;
            continue;
        }

        kept.push(paper);
    }

    count_kept(&mut stats, &kept);
    (kept, stats)
}

fn count_kept(stats: &mut DedupStats, kept: &[PaperRecord]) {
    stats.kept = kept.len();
    stats.kept_by_section.clear();
    for paper in kept {
        *stats
            .kept_by_section
            .entry(paper.section.as_str().to_string())
            .or_insert(0) += 1;
    }
}

/// Decides which of today's stored records are new and rewrites the day in place
pub struct DedupEngine<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    history_days: u32,
    policy: DedupPolicy,
}

impl<'a, S: RecordStore + ?Sized> DedupEngine<'a, S> {
    pub fn new(store: &'a S, history_days: u32, policy: DedupPolicy) -> Self {
        Self {
            store,
            history_days,
            policy,
        }
    }

    /// Run against the store for `today`. Store failures are logged and
    /// reported as [`DedupStatus::Error`], never returned.
    pub fn run(&self, today: NaiveDate) -> DedupReport {
        match self.try_run(today) {
            Ok(report) => report,
            Err(e) => {
                error!("Deduplication processing failed: {}", e);
                DedupReport::new(DedupStatus::Error, DedupStats::default())
            }
        }
    }

    fn try_run(&self, today: NaiveDate) -> Result<DedupReport, StoreError> {
        let path = self.store.day_path(today);

        let Some(records) = self.store.load_day(today)? else {
            warn!("Today's data file does not exist: {:?}", path);
            return Ok(DedupReport::new(DedupStatus::NoData, DedupStats::default()));
        };

        info!("Today's total papers: {}", records.len());
        if records.is_empty() {
            return Ok(DedupReport::new(DedupStatus::NoData, DedupStats::default()));
        }

        if self.policy == DedupPolicy::AcceptAll {
            let mut stats = DedupStats {
                total: records.len(),
                ..Default::default()
            };
            count_kept(&mut stats, &records);
            info!("Cross-day deduplication disabled, accepting {} papers", stats.kept);
            return Ok(DedupReport::new(DedupStatus::HasNewContent, stats));
        }

        let history = self.history_keys(today)?;
        info!(
            "History {}-day key count: {}",
            self.history_days,
            history.len()
        );

        let (kept, stats) = filter_new(records, &history);
        info!(
            "kept={} repl_kept={} dup_today={} dup_history={} by_section={:?}",
            stats.kept,
            stats.replacements_kept,
            stats.duplicates_today,
            stats.duplicates_history,
            stats.kept_by_section
        );

        if kept.is_empty() {
            self.store.remove_day(today)?;
            info!("All papers are duplicates, removed {:?}", path);
            return Ok(DedupReport::new(DedupStatus::NoNewContent, stats));
        }

        self.store.save_day(today, &kept)?;
        info!("Updated {:?} with {} papers", path, kept.len());
        Ok(DedupReport::new(DedupStatus::HasNewContent, stats))
    }

    /// Union of keys stored on the `history_days` days before `today`.
    /// The window stops early at the start of the representable calendar.
    pub fn history_keys(&self, today: NaiveDate) -> Result<HashSet<DedupKey>, StoreError> {
        let mut keys = HashSet::new();

        for offset in 1..=self.history_days {
            let Some(day) = today.checked_sub_days(Days::new(u64::from(offset))) else {
                break;
            };
            if let Some(records) = self.store.load_day(day)? {
                keys.extend(records.iter().map(PaperRecord::dedup_key));
            }
        }

        Ok(keys)
    }
}
