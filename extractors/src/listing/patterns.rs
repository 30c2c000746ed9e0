use regex::Regex;
use std::collections::BTreeSet;
use url::Url;

/// Compiled patterns for reading identifiers and subject codes off a listing page
pub struct ListingPatterns {
    identifier: Regex,
    subject_code: Regex,
}

impl ListingPatterns {
    pub fn new() -> Self {
        Self {
            // 4 digits, a dot, exactly 5 digits, optional version, then end of the path segment
            identifier: Regex::new(r"/abs/([0-9]{4}\.[0-9]{5})(v[0-9]+)?(?:[/?#]|$)").unwrap(),
            // (math.RT), (cs.CV), (hep-th.XX)
            subject_code: Regex::new(r"\(([a-z\-]+\.[A-Z]{2})\)").unwrap(),
        }
    }

    /// Pull `(id, version)` out of an absolute abstract URL
    pub fn identifier(&self, abstract_url: &str) -> Option<(String, Option<String>)> {
        let caps = self.identifier.captures(abstract_url)?;
        let id = caps.get(1)?.as_str().to_string();
        let version = caps.get(2).map(|m| m.as_str().to_string());
        Some((id, version))
    }

    pub fn subject_codes(&self, subjects_text: &str) -> BTreeSet<String> {
        self.subject_code
            .captures_iter(subjects_text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for ListingPatterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a possibly relative href against the page it was found on
pub fn resolve_link(page_url: &str, href: &str) -> String {
    Url::parse(page_url)
        .and_then(|base| base.join(href))
        .map(|url| url.to_string())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_without_version() {
        let patterns = ListingPatterns::new();
        let parsed = patterns.identifier("https://arxiv.org/abs/2401.12345");
        assert_eq!(parsed, Some(("2401.12345".to_string(), None)));
    }

    #[test]
    fn test_identifier_with_version() {
        let patterns = ListingPatterns::new();
        let parsed = patterns.identifier("https://arxiv.org/abs/2401.12345v3");
        assert_eq!(
            parsed,
            Some(("2401.12345".to_string(), Some("v3".to_string())))
        );
    }

    #[test]
    fn test_identifier_rejects_wrong_shapes() {
        let patterns = ListingPatterns::new();
        assert!(patterns.identifier("https://arxiv.org/abs/2401.1234").is_none());
        assert!(patterns.identifier("https://arxiv.org/abs/2401.123456").is_none());
        assert!(patterns.identifier("https://arxiv.org/abs/math/0601001").is_none());
        assert!(patterns.identifier("https://arxiv.org/list/math.RT/new").is_none());
    }

    #[test]
    fn test_subject_codes() {
        let patterns = ListingPatterns::new();
        let codes = patterns.subject_codes(
            "Subjects: Representation Theory (math.RT); Quantum Algebra (math.QA); Mathematical Physics (math-ph)",
        );

        let expected: BTreeSet<String> = ["math.QA", "math.RT"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(codes, expected);
    }

    #[test]
    fn test_subject_codes_hyphenated_discipline() {
        let patterns = ListingPatterns::new();
        let codes = patterns.subject_codes("High Energy Physics (hep-th.XY)");
        assert!(codes.contains("hep-th.XY"));
        assert!(patterns.subject_codes("").is_empty());
    }

    #[test]
    fn test_resolve_link() {
        assert_eq!(
            resolve_link("https://arxiv.org/list/math.RT/new", "/abs/2401.00001"),
            "https://arxiv.org/abs/2401.00001"
        );
        assert_eq!(
            resolve_link("not a url", "/abs/2401.00001"),
            "/abs/2401.00001"
        );
    }
}
