//! Fixed-version marker parsing
//!
//! Maintainers mark an auto-generated issue as resolved by putting
//! `fixed:<version>` somewhere in its body.

use regex::Regex;
use std::sync::LazyLock;

/// Literal that introduces the fixed version
pub const FIXED_MARKER_PREFIX: &str = "fixed:";

static FIXED_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "{}([0-9A-Za-z][0-9A-Za-z.+_-]*)",
        regex::escape(FIXED_MARKER_PREFIX)
    ))
    .expect("hardcoded regex is valid")
});

/// Extract the version from the first `fixed:<version>` marker in `body`
///
/// A bare `fixed:` with no version attached does not count as a marker.
/// Trailing dots (sentence punctuation) are not part of the version.
pub fn fixed_version(body: &str) -> Option<&str> {
    FIXED_MARKER
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('.'))
        .find(|version| !version.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_built_from_prefix() {
        let body = format!("{FIXED_MARKER_PREFIX}2.0.1");
        assert_eq!(fixed_version(&body), Some("2.0.1"));
    }

    #[test]
    fn test_marker_alone() {
        assert_eq!(fixed_version("fixed:0.9.3"), Some("0.9.3"));
    }

    #[test]
    fn test_marker_inside_body() {
        let body = "Crash in parser.\n\nfixed:1.4.0-rc1\n\nSee commit abc.";
        assert_eq!(fixed_version(body), Some("1.4.0-rc1"));
    }

    #[test]
    fn test_marker_with_sentence_punctuation() {
        assert_eq!(fixed_version("This is fixed:2.0."), Some("2.0"));
    }

    #[test]
    fn test_no_marker() {
        assert_eq!(fixed_version(""), None);
        assert_eq!(fixed_version("not fixed yet"), None);
        assert_eq!(fixed_version("fixed: 1.0"), None);
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        assert_eq!(fixed_version("Fixed:1.0"), None);
    }
}
