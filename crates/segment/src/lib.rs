//! Policy section tree inference.
//!
//! Real policies arrive as loosely formatted prose: sometimes markdown
//! headings, sometimes a table of contents, often nothing but a short
//! capitalized line between blank lines. This crate turns that text into an
//! ordered list of nested [`Section`]s with exact byte offsets.
//!
//! ## How a heading is recognised
//!
//! Each non-blank line is offered to a [`HeadingClassifier`], an ordered set
//! of independent [`HeadingRule`]s:
//!
//! - **Markup** - `#` to `######`, a space, then text. Level = marker count.
//! - **TOC evidence** - the line matches an entry listed under a "Table of
//!   Contents" block in the same document. Level 2.
//! - **Typography** - a blank-isolated line of at most 90 characters that
//!   does not end in `.` or `;`, and either ends in `?`/`:` or is mostly
//!   title-cased. Level 2.
//!
//! ## Guarantees
//!
//! - Never fails and never returns an empty list; heading-free or empty text
//!   becomes one synthetic `"Document"` section
//! - The first section starts at 0 and the last ends at `text.len()`
//! - A child's range lies inside its parent's range
//! - Pure: no I/O, no clock-dependent output, same text gives the same tree
//!
//! ```rust
//! use segment::build_section_tree;
//!
//! let sections = build_section_tree("# Intro\nHello\n## Details\nWorld\n");
//!
//! assert_eq!(sections[0].section_id, "section_1");
//! assert_eq!(sections[0].section_path, "Intro");
//! assert_eq!(sections[1].section_path, "Intro > Details");
//! assert_eq!((sections[1].start_offset, sections[1].end_offset), (14, 31));
//! ```

mod classifier;
mod config;
mod lines;
mod normalize;
mod section;
mod toc;
mod tree;

pub use crate::classifier::{
    HeadingCandidate, HeadingClassifier, HeadingEvidence, HeadingRule, LineContext,
    MarkupHeadingRule, TocTitleRule, TypographicHeadingRule,
};
pub use crate::config::{SegmentConfig, SegmentConfigError, MAX_HEADING_LEVEL};
pub use crate::normalize::normalize_title;
pub use crate::section::{section_bodies, Section, DOCUMENT_TITLE, SECTION_PATH_SEPARATOR};
pub use crate::tree::SectionTreeBuilder;

/// Builds the section tree for `text` with default settings.
pub fn build_section_tree(text: &str) -> Vec<Section> {
    SectionTreeBuilder::default().build(text)
}

/// Builds the section tree for `text` with custom settings.
pub fn build_section_tree_with_config(
    text: &str,
    cfg: &SegmentConfig,
) -> Result<Vec<Section>, SegmentConfigError> {
    Ok(SectionTreeBuilder::new(cfg.clone())?.build(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_config_changes_heuristic_level() {
        let cfg = SegmentConfig {
            heuristic_level: 3,
            ..Default::default()
        };
        let sections =
            build_section_tree_with_config("# Top\n\nShort Title\n\nbody\n", &cfg).unwrap();
        assert_eq!(sections[1].level, 3);
        assert_eq!(sections[1].section_path, "Top > Short Title");
    }

    #[test]
    fn invalid_config_is_reported() {
        let cfg = SegmentConfig::default().with_title_case_ratio(2.0);
        assert!(build_section_tree_with_config("x", &cfg).is_err());
    }

    #[test]
    fn stricter_ratio_drops_weak_titles() {
        let text = "\nCookies and Tracking Tools\n\nbody\n";
        assert_eq!(build_section_tree(text)[0].title, "Cookies and Tracking Tools");

        let cfg = SegmentConfig::default().with_title_case_ratio(0.9);
        let sections = build_section_tree_with_config(text, &cfg).unwrap();
        assert_eq!(sections[0].title, DOCUMENT_TITLE);
    }
}
