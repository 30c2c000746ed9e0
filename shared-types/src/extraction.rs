use serde::{Deserialize, Serialize};

/// Extraction error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// One classification listing page, reduced to the structure the extractor reads.
///
/// Blocks keep page order: a heading governs every entry block after it until
/// the next heading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingPage {
    /// Classification the page was fetched for, e.g. `math.RT`
    pub source_category: String,
    /// Page URL, used to resolve relative links
    pub url: String,
    pub blocks: Vec<PageBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PageBlock {
    Heading(String),
    Entries(Vec<ListingEntry>),
}

/// A paired identity (`dt`) and detail (`dd`) element
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Href of the abstract link inside the identity element, as written on the page
    pub abstract_href: Option<String>,
    /// Subject line of the detail element; empty when the page had none
    pub subjects_text: String,
}

impl ListingPage {
    pub fn new(source_category: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            source_category: source_category.into(),
            url: url.into(),
            blocks: Vec::new(),
        }
    }

    pub fn entry_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|block| match block {
                PageBlock::Entries(entries) => entries.len(),
                PageBlock::Heading(_) => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_count_ignores_headings() {
        let mut page = ListingPage::new("math.RT", "https://arxiv.org/list/math.RT/new");
        page.blocks.push(PageBlock::Heading("New submissions".to_string()));
        page.blocks.push(PageBlock::Entries(vec![
            ListingEntry::default(),
            ListingEntry::default(),
        ]));
        page.blocks.push(PageBlock::Heading("Replacements".to_string()));
        page.blocks.push(PageBlock::Entries(vec![ListingEntry::default()]));

        assert_eq!(page.entry_count(), 3);
    }

    #[test]
    fn test_page_block_serialization() {
        let block = PageBlock::Heading("Cross submissions".to_string());
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, r#"{"type":"Heading","data":"Cross submissions"}"#);
    }
}
