//! Extractors Crate
//!
//! Turns classification listing pages into ordered [`shared_types::PaperRecord`]s.
//!
//! # Architecture
//!
//! - **Types**: records and the page structure are defined in the `shared-types` crate
//! - **Parsing**: [`ListingHtmlParser`] reduces listing HTML to a [`shared_types::ListingPage`]
//! - **Extraction**: [`ListingExtractor`] applies identifier/category patterns, the
//!   target-match decision and the run-wide [`SeenIds`]
//! - **Sources**: [`SourcePlan`] orders the classification pages for a run
//!
//! # Example
//!
//! ```rust,ignore
//! use extractors::{into_ordered, ListingExtractor, ListingHtmlParser, SeenIds, SourcePlan};
//!
//! let plan = SourcePlan::from_category_list("math.QA,math.RT", &table, base_url);
//! let extractor = ListingExtractor::new(plan.target_categories());
//! let mut seen = SeenIds::new();
//! let mut ranked = Vec::new();
//! for source in plan.sources() {
//!     let page = parser.parse(&html, &source.category, &source.url);
//!     ranked.extend(extractor.extract_page(&page, source.priority, &mut seen));
//! }
//! let records = into_ordered(ranked);
//! ```

pub mod listing;
pub mod sources;

// Re-export commonly used types
pub use listing::{
    into_ordered, sort_ranked, ListingExtractor, ListingHtmlParser, ListingPatterns,
    MatchDecision, RankedRecord, SeenIds,
};
pub use sources::{ListingSource, SourcePlan};
