//! Legacy filter strings.
//!
//! The list protocol expresses paging as free-text keyword terms inside the
//! filter (`first=11 rows=10`). [`FilterTermString`] keeps that text behind an
//! immutable value type so window arithmetic never concatenates strings at
//! call sites.

use std::fmt;

/// Keyword carrying the 1-based index of the first row to return.
pub const FIRST_KEYWORD: &str = "first";

/// Keyword carrying the page size.
pub const ROWS_KEYWORD: &str = "rows";

/// Immutable filter string made of whitespace-separated terms.
///
/// Each term is either `key=value` or a bare keyword. Every operation returns
/// a new instance and leaves unrelated terms in their original order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterTermString {
    raw: Option<String>,
}

impl FilterTermString {
    /// Wrap a raw filter string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    /// Wrap an optional filter, as received from a GraphQL argument.
    pub fn from_optional(raw: Option<String>) -> Self {
        Self { raw }
    }

    /// Raw filter text, empty if the filter was never set.
    pub fn as_str(&self) -> &str {
        self.raw.as_deref().unwrap_or("")
    }

    /// Whether the filter carries no terms at all.
    pub fn is_empty(&self) -> bool {
        self.as_str().trim().is_empty()
    }

    /// Remove every `keyword=<value>` term.
    ///
    /// Matching is on whole terms, so `irows=1` survives `remove_term("rows")`.
    /// A bare `keyword=` without a value is left alone. Whitespace between the
    /// remaining terms is collapsed to single spaces.
    pub fn remove_term(&self, keyword: &str) -> Self {
        let remaining: Vec<&str> = self
            .as_str()
            .split_whitespace()
            .filter(|term| !is_term_for(term, keyword))
            .collect();

        Self::new(remaining.join(" "))
    }

    /// Append `keyword=value`.
    ///
    /// No deduplication happens here; callers remove stale terms first.
    pub fn add_term(&self, keyword: &str, value: impl fmt::Display) -> Self {
        let current = self.as_str();
        let raw = if current.is_empty() {
            format!("{keyword}={value}")
        } else {
            format!("{current} {keyword}={value}")
        };

        Self::new(raw)
    }

    /// Value of the first `keyword=<value>` term, if any.
    pub fn term_value(&self, keyword: &str) -> Option<&str> {
        self.as_str()
            .split_whitespace()
            .find(|term| is_term_for(term, keyword))
            .and_then(|term| term.split_once('='))
            .map(|(_, value)| value)
    }
}

/// Whether `term` is `keyword=<non-empty value>`.
fn is_term_for(term: &str, keyword: &str) -> bool {
    term.strip_prefix(keyword)
        .and_then(|rest| rest.strip_prefix('='))
        .is_some_and(|value| !value.is_empty())
}

impl fmt::Display for FilterTermString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FilterTermString {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for FilterTermString {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<Option<String>> for FilterTermString {
    fn from(raw: Option<String>) -> Self {
        Self::from_optional(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_filter_is_empty_string() {
        let filter = FilterTermString::from_optional(None);
        assert_eq!(filter.to_string(), "");
        assert!(filter.is_empty());
    }

    #[test]
    fn test_add_then_remove_restores_filter() {
        let filter = FilterTermString::new("foo=bar").add_term(ROWS_KEYWORD, 5);
        assert_eq!(filter.as_str(), "foo=bar rows=5");
        assert_eq!(filter.remove_term(ROWS_KEYWORD).as_str(), "foo=bar");
    }

    #[test]
    fn test_add_to_empty_has_no_leading_space() {
        let filter = FilterTermString::default().add_term(FIRST_KEYWORD, 12);
        assert_eq!(filter.as_str(), "first=12");
    }

    #[test]
    fn test_add_does_not_deduplicate() {
        let filter = FilterTermString::new("")
            .add_term(ROWS_KEYWORD, 5)
            .add_term(ROWS_KEYWORD, 5);
        assert_eq!(filter.as_str(), "rows=5 rows=5");
    }

    // Test critique: un mot-clé suffixe d'un autre ne doit jamais matcher
    #[test]
    fn test_remove_ignores_longer_keywords() {
        let filter = FilterTermString::new("irows=1 foo=bar");
        assert_eq!(filter.remove_term(ROWS_KEYWORD).as_str(), "irows=1 foo=bar");

        let filter = FilterTermString::new("rowsx=1 first=3");
        assert_eq!(filter.remove_term(ROWS_KEYWORD).as_str(), "rowsx=1 first=3");
    }

    #[test]
    fn test_remove_every_occurrence_and_collapse_whitespace() {
        let filter = FilterTermString::new("  rows=5   name~scan\trows=-1  sort=name ");
        assert_eq!(
            filter.remove_term(ROWS_KEYWORD).as_str(),
            "name~scan sort=name"
        );
    }

    #[test]
    fn test_remove_keeps_bare_keyword_without_value() {
        let filter = FilterTermString::new("rows= apply_overrides=1");
        assert_eq!(
            filter.remove_term(ROWS_KEYWORD).as_str(),
            "rows= apply_overrides=1"
        );
    }

    #[test]
    fn test_operations_leave_original_untouched() {
        let original = FilterTermString::new("lorem rows=5");
        let _ = original.remove_term(ROWS_KEYWORD).add_term(FIRST_KEYWORD, 2);
        assert_eq!(original.as_str(), "lorem rows=5");
    }

    #[test]
    fn test_term_value() {
        let filter = FilterTermString::new("lorem rows=10 first=114");
        assert_eq!(filter.term_value(FIRST_KEYWORD), Some("114"));
        assert_eq!(filter.term_value(ROWS_KEYWORD), Some("10"));
        assert_eq!(filter.term_value("sort"), None);
    }
}
