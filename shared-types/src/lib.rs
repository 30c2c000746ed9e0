pub mod dedup;
pub mod extraction;
pub mod paper;

pub use dedup::{Continuation, DedupPolicy, DedupStatus};
pub use extraction::{ExtractionError, ListingEntry, ListingPage, PageBlock};
pub use paper::{document_url_for, DedupKey, PaperRecord, Section, DEFAULT_VERSION};
