//! Suffix-based selection of archive entries worth checking.
//!
//! Selection is an intentional filter, not a validation step: entries that
//! do not match are skipped silently and never staged or reported.

/// Default suffix for PHP sources.
pub const PHP_SUFFIX: &str = ".php";

/// Case-sensitive filename suffix filter.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    suffix: String,
}

impl CandidateFilter {
    /// Create a filter for the given suffix (including the leading dot).
    #[must_use]
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    /// Returns true when the entry name qualifies for checking.
    #[must_use]
    pub fn matches(&self, entry_name: &str) -> bool {
        entry_name.ends_with(&self.suffix)
    }

    /// The configured suffix.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self::new(PHP_SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("index.php", true)]
    #[case::nested("src/controllers/home.php", true)]
    #[case::other_extension("readme.txt", false)]
    #[case::uppercase_is_not_a_match("INDEX.PHP", false)]
    #[case::suffix_without_dot("indexphp", false)]
    #[case::directory_entry("src/", false)]
    fn default_filter_matches_php_sources(#[case] name: &str, #[case] expected: bool) {
        let filter = CandidateFilter::default();
        assert_eq!(filter.matches(name), expected, "entry: {name}");
    }

    #[test]
    fn custom_suffix_is_honoured() {
        let filter = CandidateFilter::new(".phtml");
        assert!(filter.matches("page.phtml"));
        assert!(!filter.matches("page.php"));
    }
}
