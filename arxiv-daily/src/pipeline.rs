use anyhow::{bail, Result};
use chrono::NaiveDate;
use extractors::{into_ordered, ListingExtractor, ListingHtmlParser, SeenIds, SourcePlan};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::SourcesConfig;
use crate::pages::PageSource;
use crate::storage::RecordStore;

#[derive(Debug, Clone)]
pub struct ScrapeSummary {
    pub date: NaiveDate,
    pub path: PathBuf,
    pub sources: Vec<String>,
    pub missing_sources: Vec<String>,
    pub records: usize,
}

/// Extract every configured source in priority order and write the day's store.
///
/// Pages are processed one after another with a single [`SeenIds`], so a
/// paper listed under several sources lands under the highest-priority one.
pub fn run_scrape(
    config: &SourcesConfig,
    pages: &dyn PageSource,
    store: &dyn RecordStore,
    date: NaiveDate,
) -> Result<ScrapeSummary> {
    let plan = SourcePlan::from_category_list(
        &config.categories,
        &config.priority_table(),
        &config.listing_base_url,
    );
    let extractor = ListingExtractor::new(plan.target_categories());
    let parser = ListingHtmlParser::new()?;

    let mut seen = SeenIds::new();
    let mut ranked = Vec::new();
    let mut sources = Vec::new();
    let mut missing_sources = Vec::new();

    for source in plan.sources() {
        let Some(html) = pages.load(&source.category)? else {
            warn!("No listing page for {}, skipping", source.category);
            missing_sources.push(source.category.clone());
            continue;
        };

        let page = parser.parse(&html, &source.category, &source.url);
        let items = extractor.extract_page(&page, source.priority, &mut seen);
        info!(
            "{}: kept {} of {} entries",
            source.category,
            items.len(),
            page.entry_count()
        );

        ranked.extend(items);
        sources.push(source.category.clone());
    }

    if sources.is_empty() {
        bail!("No listing pages available for {:?}", config.categories);
    }

    let records = into_ordered(ranked);
    store.save_day(date, &records)?;

    let path = store.day_path(date);
    info!("Wrote {} papers to {:?}", records.len(), path);

    Ok(ScrapeSummary {
        date,
        path,
        sources,
        missing_sources,
        records: records.len(),
    })
}
