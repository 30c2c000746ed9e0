use std::collections::{HashMap, HashSet};

pub const DEFAULT_CATEGORIES: &str = "math.RT";
pub const DEFAULT_LISTING_BASE_URL: &str = "https://arxiv.org/list";

/// Rank given to categories missing from the priority table
pub const UNLISTED_PRIORITY: u32 = 99;

/// `math.QA` pages are processed before `math.RT` pages
pub const DEFAULT_PRIORITY_ORDER: [&str; 2] = ["math.QA", "math.RT"];

/// Rank each category by its position in `order`
pub fn priority_table<S: AsRef<str>>(order: &[S]) -> HashMap<String, u32> {
    let mut table = HashMap::new();
    for (rank, category) in order.iter().enumerate() {
        table.entry(category.as_ref().trim().to_string()).or_insert(rank as u32);
    }
    table
}

pub fn default_priority_table() -> HashMap<String, u32> {
    priority_table(&DEFAULT_PRIORITY_ORDER)
}

/// One classification page to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSource {
    pub category: String,
    /// Position in the plan; lower sorts first in the merged output
    pub priority: u32,
    pub url: String,
}

/// Ordered list of classification sources for one run
#[derive(Debug, Clone)]
pub struct SourcePlan {
    sources: Vec<ListingSource>,
}

impl SourcePlan {
    /// Build a plan from a comma-separated category list such as `"math.RT, math.QA"`.
    ///
    /// Categories are trimmed and de-duplicated, then stable-sorted by the
    /// priority table. An empty list falls back to [`DEFAULT_CATEGORIES`].
    pub fn from_category_list(
        raw: &str,
        priority_table: &HashMap<String, u32>,
        listing_base_url: &str,
    ) -> Self {
        let mut categories = parse_category_list(raw);
        if categories.is_empty() {
            categories = parse_category_list(DEFAULT_CATEGORIES);
        }

        categories.sort_by_key(|c| priority_table.get(c).copied().unwrap_or(UNLISTED_PRIORITY));

        let sources = categories
            .into_iter()
            .enumerate()
            .map(|(index, category)| ListingSource {
                url: listing_url(listing_base_url, &category),
                priority: index as u32,
                category,
            })
            .collect();

        Self { sources }
    }

    pub fn sources(&self) -> &[ListingSource] {
        &self.sources
    }

    pub fn target_categories(&self) -> HashSet<String> {
        self.sources.iter().map(|s| s.category.clone()).collect()
    }
}

pub fn listing_url(listing_base_url: &str, category: &str) -> String {
    format!("{}/{}/new", listing_base_url.trim_end_matches('/'), category)
}

fn parse_category_list(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .filter(|c| seen.insert(c.to_string()))
        .map(String::from)
        .collect()
}
