//! Configuration for heading detection and TOC scanning.
//!
//! The defaults reproduce the reference heuristics exactly; tuning them is
//! meant for corpora with unusual typography, not for everyday use.
//!
//! ```rust
//! use segment::SegmentConfig;
//!
//! let cfg = SegmentConfig::default();
//! assert_eq!(cfg.max_heading_chars, 90);
//! assert_eq!(cfg.heuristic_level, 2);
//! assert!(cfg.validate().is_ok());
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Deepest level a markup heading can express (`######`).
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Tunables for the heading classifier and TOC extractor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SegmentConfig {
    /// Minimum share of whitespace tokens starting with an uppercase letter
    /// for an isolated line to count as a title-cased heading.
    ///
    /// Default: `0.6`
    pub title_case_ratio: f64,

    /// Longest (in characters) line the typographic heuristic will promote.
    ///
    /// Default: `90`
    pub max_heading_chars: usize,

    /// Level assigned to typographic headings.
    ///
    /// Default: `2`
    pub heuristic_level: u8,

    /// Level assigned to lines matching a table-of-contents entry.
    ///
    /// Default: `2`
    pub toc_level: u8,

    /// A bare `Contents` line only opens a TOC within this many leading
    /// lines; `Table of Contents` opens one anywhere.
    ///
    /// Default: `30`
    pub toc_scan_lines: usize,

    /// Consecutive non-entry lines (blank or not) that close a TOC.
    ///
    /// Default: `6`
    pub toc_gap_limit: usize,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            title_case_ratio: 0.6,
            max_heading_chars: 90,
            heuristic_level: 2,
            toc_level: 2,
            toc_scan_lines: 30,
            toc_gap_limit: 6,
        }
    }
}

impl SegmentConfig {
    pub fn with_title_case_ratio(mut self, ratio: f64) -> Self {
        self.title_case_ratio = ratio;
        self
    }

    pub fn with_max_heading_chars(mut self, max: usize) -> Self {
        self.max_heading_chars = max;
        self
    }

    pub fn with_toc_gap_limit(mut self, limit: usize) -> Self {
        self.toc_gap_limit = limit;
        self
    }

    pub fn validate(&self) -> Result<(), SegmentConfigError> {
        if !(self.title_case_ratio > 0.0 && self.title_case_ratio <= 1.0) {
            return Err(SegmentConfigError::InvalidTitleCaseRatio(
                self.title_case_ratio,
            ));
        }
        if self.max_heading_chars == 0 {
            return Err(SegmentConfigError::ZeroMaxHeadingChars);
        }
        for (field, level) in [
            ("heuristic_level", self.heuristic_level),
            ("toc_level", self.toc_level),
        ] {
            if level == 0 || level > MAX_HEADING_LEVEL {
                return Err(SegmentConfigError::InvalidLevel { field, level });
            }
        }
        if self.toc_gap_limit == 0 {
            return Err(SegmentConfigError::ZeroTocGapLimit);
        }
        Ok(())
    }
}

/// Reasons a [`SegmentConfig`] is rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SegmentConfigError {
    #[error("title_case_ratio must be in (0, 1], got {0}")]
    InvalidTitleCaseRatio(f64),
    #[error("max_heading_chars must be >= 1")]
    ZeroMaxHeadingChars,
    #[error("{field} must be in 1..=6, got {level}")]
    InvalidLevel { field: &'static str, level: u8 },
    #[error("toc_gap_limit must be >= 1")]
    ZeroTocGapLimit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = SegmentConfig::default();
        assert_eq!(cfg.title_case_ratio, 0.6);
        assert_eq!(cfg.toc_scan_lines, 30);
        assert_eq!(cfg.toc_gap_limit, 6);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn ratio_out_of_range_rejected() {
        let cfg = SegmentConfig::default().with_title_case_ratio(0.0);
        assert_eq!(
            cfg.validate(),
            Err(SegmentConfigError::InvalidTitleCaseRatio(0.0))
        );
        let cfg = SegmentConfig::default().with_title_case_ratio(1.5);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn level_out_of_range_rejected() {
        let cfg = SegmentConfig {
            toc_level: 7,
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(SegmentConfigError::InvalidLevel {
                field: "toc_level",
                level: 7
            })
        );
    }

    #[test]
    fn zero_gap_limit_rejected() {
        let cfg = SegmentConfig::default().with_toc_gap_limit(0);
        assert_eq!(cfg.validate(), Err(SegmentConfigError::ZeroTocGapLimit));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: SegmentConfig = serde_json::from_str(r#"{"max_heading_chars": 60}"#).unwrap();
        assert_eq!(cfg.max_heading_chars, 60);
        assert_eq!(cfg.heuristic_level, 2);
    }
}
