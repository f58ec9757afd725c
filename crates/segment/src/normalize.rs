//! Heading title normalization.
//!
//! Every detected heading, TOC entry, and TOC lookup key goes through
//! [`normalize_title`] so the three can be compared directly:
//!
//! 1. Markdown links `[label](target)` are replaced by `label`
//! 2. Runs of Unicode whitespace collapse to one ASCII space
//! 3. Leading and trailing whitespace is trimmed
//!
//! ```rust
//! use segment::normalize_title;
//!
//! assert_eq!(normalize_title("  [Your  Rights](#rights)\tand Choices "), "Your Rights and Choices");
//! ```
use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("link pattern is a valid regex")
});

/// Normalizes heading text for display and comparison.
pub fn normalize_title(text: &str) -> String {
    let unlinked: Cow<'_, str> = LINK_RE.replace_all(text, "$1");
    collapse_whitespace(&unlinked)
}

/// Collapses repeated whitespace and trims edges.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
