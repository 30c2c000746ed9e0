use scraper::{ElementRef, Html, Selector};
use shared_types::{ExtractionError, ListingEntry, ListingPage, PageBlock};

/// Reads the `#dlpage` listing layout: `h3` headings alternating with `dl`
/// blocks whose `dt`/`dd` children pair up in order.
pub struct ListingHtmlParser {
    blocks: Selector,
    term: Selector,
    definition: Selector,
    abstract_link: Selector,
    abs_link: Selector,
    subjects: Selector,
}

impl ListingHtmlParser {
    pub fn new() -> Result<Self, ExtractionError> {
        Ok(Self {
            blocks: selector("#dlpage > h3, #dlpage > dl")?,
            term: selector("dt")?,
            definition: selector("dd")?,
            abstract_link: selector("a[title='Abstract']")?,
            abs_link: selector("a[href*='/abs/']")?,
            subjects: selector(".list-subjects")?,
        })
    }

    pub fn parse(&self, html: &str, source_category: &str, url: &str) -> ListingPage {
        let document = Html::parse_document(html);
        let mut page = ListingPage::new(source_category, url);

        for element in document.select(&self.blocks) {
            match element.value().name() {
                "h3" => {
                    let heading = element.text().collect::<String>().trim().to_string();
                    page.blocks.push(PageBlock::Heading(heading));
                }
                "dl" => {
                    let terms = element.select(&self.term);
                    let definitions = element.select(&self.definition);
                    let entries = terms
                        .zip(definitions)
                        .map(|(dt, dd)| self.entry(dt, dd))
                        .collect();
                    page.blocks.push(PageBlock::Entries(entries));
                }
                _ => {}
            }
        }

        page
    }

    fn entry(&self, dt: ElementRef, dd: ElementRef) -> ListingEntry {
        let abstract_href = dt
            .select(&self.abstract_link)
            .find_map(|a| a.value().attr("href"))
            .or_else(|| dt.select(&self.abs_link).find_map(|a| a.value().attr("href")))
            .map(|href| href.to_string());

        let subjects_text = dd
            .select(&self.subjects)
            .flat_map(|el| el.text())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        ListingEntry {
            abstract_href,
            subjects_text,
        }
    }
}

fn selector(css: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(css)
        .map_err(|e| ExtractionError::ParseError(format!("Invalid selector {}: {}", css, e)))
}
