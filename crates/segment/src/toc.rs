//! Table-of-contents scanning.
//!
//! One forward pass. A line containing "table of contents" (anywhere), or a
//! line that is exactly "contents" within the first `toc_scan_lines` lines,
//! opens a TOC block. Inside a block every bullet or numbered entry yields a
//! title; `toc_gap_limit` consecutive lines that yield nothing close it.
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::SegmentConfig;
use crate::normalize::normalize_title;

static BULLET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[-*•]|\d+\.)\s+(.+?)\s*$").expect("bullet pattern is a valid regex")
});

fn opens_toc(line: &str, line_index: usize, cfg: &SegmentConfig) -> bool {
    let lower = line.trim().to_lowercase();
    lower.contains("table of contents") || (lower == "contents" && line_index < cfg.toc_scan_lines)
}

/// Returns normalized, lower-cased TOC entry titles.
pub(crate) fn scan_toc<'a, I>(lines: I, cfg: &SegmentConfig) -> HashSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut titles = HashSet::new();
    let mut in_toc = false;
    let mut gap = 0usize;

    for (idx, line) in lines.into_iter().enumerate() {
        if opens_toc(line, idx, cfg) {
            in_toc = true;
            gap = 0;
            continue;
        }
        if !in_toc {
            continue;
        }

        let entry = BULLET_RE
            .captures(line)
            .map(|caps| normalize_title(&caps[1]).to_lowercase())
            .filter(|title| !title.is_empty());
        match entry {
            Some(title) => {
                titles.insert(title);
                gap = 0;
            }
            None => {
                gap += 1;
                if gap >= cfg.toc_gap_limit {
                    in_toc = false;
                    gap = 0;
                }
            }
        }
    }

    titles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<String> {
        let mut titles: Vec<String> = scan_toc(text.lines(), &SegmentConfig::default())
            .into_iter()
            .collect();
        titles.sort();
        titles
    }

    #[test]
    fn bullets_and_numbers_collected() {
        let text = "Table of Contents\n- Overview\n* [Data Use](#use)\n• Sharing\n12. Your  Rights\n";
        assert_eq!(scan(text), vec!["data use", "overview", "sharing", "your rights"]);
    }

    #[test]
    fn no_trigger_no_titles() {
        assert!(scan("- Overview\n- Data Use\n").is_empty());
    }

    #[test]
    fn bare_contents_only_counts_near_the_top() {
        let early = "Contents\n- Overview\n";
        assert_eq!(scan(early), vec!["overview"]);

        let late = format!("{}Contents\n- Overview\n", "filler\n".repeat(30));
        assert!(scan(&late).is_empty());

        let late_full = format!("{}TABLE OF CONTENTS\n- Overview\n", "filler\n".repeat(30));
        assert_eq!(scan(&late_full), vec!["overview"]);
    }

    #[test]
    fn gap_limit_closes_block() {
        let text = "Table of Contents\n- One\n\n\n\n\n\n\n- Two\n";
        assert_eq!(scan(text), vec!["one"]);
    }

    #[test]
    fn productive_lines_reset_gap() {
        let text = "Table of Contents\n- One\n\n\n\n\n\n- Two\n\n\n\n\n\n- Three\n";
        assert_eq!(scan(text), vec!["one", "three", "two"]);
    }

    #[test]
    fn later_trigger_reopens() {
        let text = "Table of Contents\n- One\na\nb\nc\nd\ne\nf\n- Lost\nTable of contents\n- Two\n";
        assert_eq!(scan(text), vec!["one", "two"]);
    }

    #[test]
    fn bullet_needs_whitespace_after_marker() {
        assert!(scan("Table of Contents\n-Overview\n1.Overview\n").is_empty());
    }
}
