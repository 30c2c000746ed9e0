mod html;
mod patterns;

pub use html::ListingHtmlParser;
pub use patterns::{resolve_link, ListingPatterns};

use shared_types::{ListingPage, PageBlock, PaperRecord, Section};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, warn};

/// Identifiers already emitted during one run.
///
/// Owned by whoever drives the run and passed to every page extraction, so a
/// paper listed under two target categories is emitted once, by the first page
/// processed.
#[derive(Debug, Default)]
pub struct SeenIds {
    ids: HashSet<String>,
}

impl SeenIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A record plus the ordering keys it carries until the run is merged
#[derive(Debug, Clone)]
pub struct RankedRecord {
    pub source_priority: u32,
    pub section_priority: u8,
    pub record: PaperRecord,
}

/// Whether an entry belongs in the output, and why
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDecision {
    /// Parsed subject codes intersect the targets
    Matched,
    /// No intersection, but the page itself is a target classification.
    /// The page's category is added to the record.
    SourceFallback,
    /// No subject code could be parsed, from an empty or garbled subject
    /// line. Kept under `other` rather than dropped for a parsing gap.
    UnparsedSubjects,
    /// At least one subject code was parsed and none is a target
    Rejected,
}

pub struct ListingExtractor {
    patterns: ListingPatterns,
    targets: HashSet<String>,
}

impl ListingExtractor {
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: ListingPatterns::new(),
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }

    pub fn decide(&self, categories: &BTreeSet<String>, source_category: &str) -> MatchDecision {
        if categories.iter().any(|c| self.targets.contains(c)) {
            MatchDecision::Matched
        } else if self.targets.contains(source_category) {
            MatchDecision::SourceFallback
        } else if categories.is_empty() {
            MatchDecision::UnparsedSubjects
        } else {
            MatchDecision::Rejected
        }
    }

    /// Extract one page's records, ordered, skipping identifiers already in `seen`.
    /// Accepted identifiers are added to `seen`.
    pub fn extract_page(
        &self,
        page: &ListingPage,
        source_priority: u32,
        seen: &mut SeenIds,
    ) -> Vec<RankedRecord> {
        let mut items = Vec::new();
        let mut section = Section::Other;

        for block in &page.blocks {
            let entries = match block {
                PageBlock::Heading(text) => {
                    section = Section::from_heading(text);
                    continue;
                }
                PageBlock::Entries(entries) => entries,
            };

            for entry in entries {
                let Some(href) = entry.abstract_href.as_deref() else {
                    continue;
                };

                let abstract_url = resolve_link(&page.url, href);
                let Some((id, version)) = self.patterns.identifier(&abstract_url) else {
                    debug!("Skipping entry without identifier: {}", abstract_url);
                    continue;
                };

                if seen.contains(&id) {
                    continue;
                }

                let mut categories = self.patterns.subject_codes(&entry.subjects_text);
                let mut entry_section = section;

                match self.decide(&categories, &page.source_category) {
                    MatchDecision::Matched => {}
                    MatchDecision::SourceFallback => {
                        categories.insert(page.source_category.clone());
                    }
                    MatchDecision::UnparsedSubjects => {
                        warn!(
                            "Could not extract categories for paper {}, including anyway",
                            id
                        );
                        entry_section = Section::Other;
                    }
                    MatchDecision::Rejected => {
                        debug!(
                            "Skipped {} on page {} with parsed categories {:?}, subjects_text={:?}",
                            id, page.source_category, categories, entry.subjects_text
                        );
                        continue;
                    }
                }

                seen.insert(id.clone());
                items.push(RankedRecord {
                    source_priority,
                    section_priority: entry_section.priority(),
                    record: PaperRecord::new(id, version, abstract_url, categories, entry_section),
                });
            }
        }

        sort_ranked(&mut items);
        debug!(
            "Extracted {} of {} entries from {}",
            items.len(),
            page.entry_count(),
            page.source_category
        );
        items
    }
}

/// Source priority ascending, then section priority ascending, then identifier descending
pub fn sort_ranked(items: &mut [RankedRecord]) {
    items.sort_by(|a, b| {
        a.source_priority
            .cmp(&b.source_priority)
            .then(a.section_priority.cmp(&b.section_priority))
            .then_with(|| b.record.id.cmp(&a.record.id))
    });
}

/// Merge ranked records from every page into the final order and drop the ordering keys
pub fn into_ordered(mut items: Vec<RankedRecord>) -> Vec<PaperRecord> {
    sort_ranked(&mut items);
    items.into_iter().map(|item| item.record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::ListingEntry;

    fn entry(href: &str, subjects: &str) -> ListingEntry {
        ListingEntry {
            abstract_href: Some(href.to_string()),
            subjects_text: subjects.to_string(),
        }
    }

    fn page(category: &str, blocks: Vec<PageBlock>) -> ListingPage {
        ListingPage {
            source_category: category.to_string(),
            url: format!("https://arxiv.org/list/{}/new", category),
            blocks,
        }
    }

    fn ids(records: &[PaperRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    fn extractor() -> ListingExtractor {
        ListingExtractor::new(["math.QA", "math.RT"])
    }

    #[test]
    fn test_sections_follow_headings() {
        let listing = page(
            "math.RT",
            vec![
                PageBlock::Heading("New submissions (showing 1 of 1 entries)".to_string()),
                PageBlock::Entries(vec![entry("/abs/2401.00001", "(math.RT)")]),
                PageBlock::Heading("Cross submissions (showing 1 of 1 entries)".to_string()),
                PageBlock::Entries(vec![entry("/abs/2401.00002", "(math.RT)")]),
                PageBlock::Heading("Replacement submissions".to_string()),
                PageBlock::Entries(vec![entry("/abs/2401.00003v2", "(math.RT)")]),
            ],
        );

        let mut seen = SeenIds::new();
        let items = extractor().extract_page(&listing, 0, &mut seen);
        let records = into_ordered(items);

        assert_eq!(ids(&records), vec!["2401.00001", "2401.00002", "2401.00003"]);
        assert_eq!(records[0].section, Section::New);
        assert_eq!(records[1].section, Section::Cross);
        assert_eq!(records[2].section, Section::Replacement);
        assert_eq!(records[2].version.as_deref(), Some("v2"));
        assert_eq!(records[0].abstract_url, "https://arxiv.org/abs/2401.00001");
        assert_eq!(records[0].document_url, "https://arxiv.org/pdf/2401.00001");
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_entries_before_any_heading_are_other() {
        let listing = page(
            "math.RT",
            vec![PageBlock::Entries(vec![entry("/abs/2401.00001", "(math.RT)")])],
        );

        let items = extractor().extract_page(&listing, 0, &mut SeenIds::new());
        assert_eq!(items[0].record.section, Section::Other);
        assert_eq!(items[0].section_priority, 3);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let listing = page(
            "math.RT",
            vec![
                PageBlock::Heading("New submissions".to_string()),
                PageBlock::Entries(vec![
                    ListingEntry {
                        abstract_href: None,
                        subjects_text: "(math.RT)".to_string(),
                    },
                    entry("/abs/2401.123", "(math.RT)"),
                    entry("/abs/2401.00009", "(math.RT)"),
                ]),
            ],
        );

        let items = extractor().extract_page(&listing, 0, &mut SeenIds::new());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].record.id, "2401.00009");
    }

    #[test]
    fn test_descending_identifiers_within_section() {
        let listing = page(
            "math.RT",
            vec![
                PageBlock::Heading("New submissions".to_string()),
                PageBlock::Entries(vec![
                    entry("/abs/2401.00005", "(math.RT)"),
                    entry("/abs/2401.00020", "(math.RT)"),
                    entry("/abs/2401.00011", "(math.RT)"),
                ]),
            ],
        );

        let records = into_ordered(extractor().extract_page(&listing, 0, &mut SeenIds::new()));
        assert_eq!(ids(&records), vec!["2401.00020", "2401.00011", "2401.00005"]);
    }

    #[test]
    fn test_target_match_decisions() {
        let extractor = ListingExtractor::new(["math.RT"]);
        let parsed = |codes: &[&str]| -> BTreeSet<String> {
            codes.iter().map(|c| c.to_string()).collect()
        };

        assert_eq!(
            extractor.decide(&parsed(&["math.RT"]), "cs.CV"),
            MatchDecision::Matched
        );
        assert_eq!(
            extractor.decide(&parsed(&["math.CO"]), "math.RT"),
            MatchDecision::SourceFallback
        );
        assert_eq!(
            extractor.decide(&parsed(&[]), "cs.CV"),
            MatchDecision::UnparsedSubjects
        );
        assert_eq!(
            extractor.decide(&parsed(&["math.CO"]), "cs.CV"),
            MatchDecision::Rejected
        );
    }

    #[test]
    fn test_source_fallback_adds_page_category() {
        let listing = page(
            "math.RT",
            vec![
                PageBlock::Heading("New submissions".to_string()),
                PageBlock::Entries(vec![
                    entry("/abs/2401.00001", "Subjects: garbled"),
                    entry("/abs/2401.00002", ""),
                ]),
            ],
        );

        let items = extractor().extract_page(&listing, 0, &mut SeenIds::new());
        assert_eq!(items.len(), 2);
        for item in &items {
            assert!(item.record.categories.contains("math.RT"));
            assert_eq!(item.record.section, Section::New);
        }
    }

    #[test]
    fn test_unparsed_subjects_kept_under_other() {
        // Page category is not a target, so only the empty-subject entry survives
        let listing = page(
            "cs.CV",
            vec![
                PageBlock::Heading("New submissions".to_string()),
                PageBlock::Entries(vec![
                    entry("/abs/2401.00001", ""),
                    entry("/abs/2401.00002", "Subjects: Computer Vision (cs.CV)"),
                ]),
            ],
        );

        let items = extractor().extract_page(&listing, 2, &mut SeenIds::new());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].record.id, "2401.00001");
        assert_eq!(items[0].record.section, Section::Other);
        assert!(items[0].record.categories.is_empty());
    }

    #[test]
    fn test_garbled_subjects_kept_under_other() {
        let listing = page(
            "cs.CV",
            vec![
                PageBlock::Heading("New submissions".to_string()),
                PageBlock::Entries(vec![
                    entry("/abs/2401.00001", "Subjects: Representation Theory (math RT)"),
                    entry("/abs/2401.00002", "Subjects: Combinatorics (math.CO)"),
                ]),
            ],
        );

        let extractor = ListingExtractor::new(["math.RT"]);
        let mut seen = SeenIds::new();
        let items = extractor.extract_page(&listing, 0, &mut seen);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].record.id, "2401.00001");
        assert_eq!(items[0].record.section, Section::Other);
        assert!(items[0].record.categories.is_empty());
        assert!(!seen.contains("2401.00002"));
    }

    #[test]
    fn test_cross_listed_paper_emitted_once_under_first_source() {
        let qa = page(
            "math.QA",
            vec![
                PageBlock::Heading("New submissions".to_string()),
                PageBlock::Entries(vec![entry("/abs/2401.00001", "(math.QA); (math.RT)")]),
            ],
        );
        let rt = page(
            "math.RT",
            vec![
                PageBlock::Heading("Cross submissions".to_string()),
                PageBlock::Entries(vec![
                    entry("/abs/2401.00001", "(math.QA); (math.RT)"),
                    entry("/abs/2401.00099", "(math.RT)"),
                ]),
            ],
        );

        let extractor = extractor();
        let mut seen = SeenIds::new();
        let mut items = extractor.extract_page(&qa, 0, &mut seen);
        items.extend(extractor.extract_page(&rt, 1, &mut seen));
        let records = into_ordered(items);

        assert_eq!(ids(&records), vec!["2401.00001", "2401.00099"]);
        assert_eq!(records[0].section, Section::New);
    }

    #[test]
    fn test_source_priority_dominates_identifier() {
        let low = page(
            "math.QA",
            vec![
                PageBlock::Heading("Replacement submissions".to_string()),
                PageBlock::Entries(vec![entry("/abs/2301.00001", "(math.QA)")]),
            ],
        );
        let high = page(
            "math.RT",
            vec![
                PageBlock::Heading("New submissions".to_string()),
                PageBlock::Entries(vec![entry("/abs/2499.99999", "(math.RT)")]),
            ],
        );

        let extractor = extractor();
        let mut seen = SeenIds::new();
        // pages handed over out of order still merge by source priority
        let mut items = extractor.extract_page(&high, 1, &mut seen);
        items.extend(extractor.extract_page(&low, 0, &mut seen));
        let records = into_ordered(items);

        assert_eq!(ids(&records), vec!["2301.00001", "2499.99999"]);
    }
}
