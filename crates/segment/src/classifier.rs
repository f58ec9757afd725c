//! Heading classification.
//!
//! A [`HeadingClassifier`] is an ordered list of [`HeadingRule`]s. Each rule
//! looks at one line in context and either declines or proposes a
//! [`HeadingCandidate`]; the first rule to propose wins. The default order
//! for a document is:
//!
//! 1. [`MarkupHeadingRule`] - `#`..`######` followed by whitespace and text
//! 2. [`TocTitleRule`] - the line matches an entry of the document's own
//!    table of contents (no isolation needed)
//! 3. [`TypographicHeadingRule`] - a short, blank-isolated line that looks
//!    like a title
//!
//! Rules never see the section stack. They only decide "is this line a
//! heading, and at what level".
//!
//! ```rust
//! use segment::{HeadingClassifier, HeadingEvidence, LineContext, SegmentConfig};
//!
//! let classifier = HeadingClassifier::for_document("", &SegmentConfig::default());
//! let line = LineContext::isolated("## [Your Rights](#rights)");
//! let heading = classifier.classify(&line).unwrap();
//!
//! assert_eq!(heading.level, 2);
//! assert_eq!(heading.title, "Your Rights");
//! assert_eq!(heading.evidence, HeadingEvidence::Markup);
//! ```
use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::SegmentConfig;
use crate::lines::{split_lines, Line};
use crate::normalize::normalize_title;
use crate::toc::scan_toc;

static MARKUP_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(#{1,6})\s+(.+?)\s*$").expect("markup heading pattern is a valid regex")
});

/// A single line plus the neighbourhood facts rules may consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineContext<'a> {
    /// Line text without its terminator.
    pub text: &'a str,
    /// The previous line is blank, or this is the first line.
    pub prev_blank: bool,
    /// The next line is blank, or this is the last line.
    pub next_blank: bool,
}

impl<'a> LineContext<'a> {
    /// A line surrounded by blank lines; handy for probing a classifier.
    pub fn isolated(text: &'a str) -> Self {
        Self {
            text,
            prev_blank: true,
            next_blank: true,
        }
    }
}

/// Which rule produced a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingEvidence {
    Markup,
    TableOfContents,
    Typographic,
}

impl HeadingEvidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingEvidence::Markup => "markup",
            HeadingEvidence::TableOfContents => "table_of_contents",
            HeadingEvidence::Typographic => "typographic",
        }
    }
}

impl fmt::Display for HeadingEvidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line accepted as a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingCandidate {
    pub level: u8,
    /// Normalized title, never empty.
    pub title: String,
    pub evidence: HeadingEvidence,
}

/// One independent heading detector.
pub trait HeadingRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn classify(&self, line: &LineContext<'_>) -> Option<HeadingCandidate>;
}

/// `#` markers: level is the marker count, title is the rest of the line.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupHeadingRule;

impl HeadingRule for MarkupHeadingRule {
    fn name(&self) -> &'static str {
        "markup"
    }

    fn classify(&self, line: &LineContext<'_>) -> Option<HeadingCandidate> {
        let caps = MARKUP_HEADING_RE.captures(line.text.trim())?;
        let title = normalize_title(&caps[2]);
        if title.is_empty() {
            return None;
        }
        Some(HeadingCandidate {
            level: caps[1].len() as u8,
            title,
            evidence: HeadingEvidence::Markup,
        })
    }
}

/// Promotes lines whose normalized text matches a table-of-contents entry,
/// case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct TocTitleRule {
    titles: HashSet<String>,
    level: u8,
}

impl TocTitleRule {
    /// Builds the rule from explicit titles; they are normalized and
    /// lower-cased here.
    pub fn new<I, S>(titles: I, level: u8) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let titles = titles
            .into_iter()
            .map(|t| normalize_title(t.as_ref()).to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { titles, level }
    }

    /// Scans `text` for table-of-contents blocks and builds the rule from
    /// their entries.
    pub fn from_text(text: &str, cfg: &SegmentConfig) -> Self {
        let lines = split_lines(text);
        Self::from_lines(&lines, cfg)
    }

    pub(crate) fn from_lines(lines: &[Line<'_>], cfg: &SegmentConfig) -> Self {
        Self {
            titles: scan_toc(lines.iter().map(|l| l.text), cfg),
            level: cfg.toc_level,
        }
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.contains(&normalize_title(title).to_lowercase())
    }
}

impl HeadingRule for TocTitleRule {
    fn name(&self) -> &'static str {
        "toc"
    }

    fn classify(&self, line: &LineContext<'_>) -> Option<HeadingCandidate> {
        if self.titles.is_empty() {
            return None;
        }
        let title = normalize_title(line.text);
        if title.is_empty() || !self.titles.contains(&title.to_lowercase()) {
            return None;
        }
        Some(HeadingCandidate {
            level: self.level,
            title,
            evidence: HeadingEvidence::TableOfContents,
        })
    }
}

/// Blank-isolated short lines that read like titles.
///
/// Lines ending in `.` or `;` are prose. Otherwise a line qualifies when it
/// ends in `?` or `:`, or when enough of its words start with a capital.
#[derive(Debug, Clone)]
pub struct TypographicHeadingRule {
    title_case_ratio: f64,
    max_heading_chars: usize,
    level: u8,
}

impl TypographicHeadingRule {
    pub fn from_config(cfg: &SegmentConfig) -> Self {
        Self {
            title_case_ratio: cfg.title_case_ratio,
            max_heading_chars: cfg.max_heading_chars,
            level: cfg.heuristic_level,
        }
    }

    fn is_title_cased(&self, title: &str) -> bool {
        let mut words = 0usize;
        let mut capitalized = 0usize;
        for word in title.split_whitespace() {
            words += 1;
            if word.chars().next().is_some_and(char::is_uppercase) {
                capitalized += 1;
            }
        }
        words > 0 && capitalized as f64 / words as f64 >= self.title_case_ratio
    }
}

impl Default for TypographicHeadingRule {
    fn default() -> Self {
        Self::from_config(&SegmentConfig::default())
    }
}

impl HeadingRule for TypographicHeadingRule {
    fn name(&self) -> &'static str {
        "typographic"
    }

    fn classify(&self, line: &LineContext<'_>) -> Option<HeadingCandidate> {
        if !(line.prev_blank && line.next_blank) {
            return None;
        }
        let title = normalize_title(line.text);
        if title.is_empty() || title.ends_with('.') || title.ends_with(';') {
            return None;
        }
        if title.chars().count() > self.max_heading_chars {
            return None;
        }
        let qualifies =
            title.ends_with('?') || title.ends_with(':') || self.is_title_cased(&title);
        qualifies.then(|| HeadingCandidate {
            level: self.level,
            title,
            evidence: HeadingEvidence::Typographic,
        })
    }
}

/// Ordered rule set; the first rule to accept a line decides it.
#[derive(Default)]
pub struct HeadingClassifier {
    rules: Vec<Box<dyn HeadingRule>>,
}

impl HeadingClassifier {
    /// An empty classifier that accepts nothing until rules are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard rule order, with TOC evidence gathered from `text`.
    pub fn for_document(text: &str, cfg: &SegmentConfig) -> Self {
        Self::with_toc(TocTitleRule::from_text(text, cfg), cfg)
    }

    /// The standard rule order around an already-built TOC rule.
    pub fn with_toc(toc: TocTitleRule, cfg: &SegmentConfig) -> Self {
        let mut classifier = Self::new().with_rule(MarkupHeadingRule);
        if !toc.is_empty() {
            classifier = classifier.with_rule(toc);
        }
        classifier.with_rule(TypographicHeadingRule::from_config(cfg))
    }

    /// Appends a rule after the existing ones.
    pub fn with_rule(mut self, rule: impl HeadingRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn classify(&self, line: &LineContext<'_>) -> Option<HeadingCandidate> {
        self.rules.iter().find_map(|rule| rule.classify(line))
    }
}

impl fmt::Debug for HeadingClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadingClassifier")
            .field("rules", &self.rule_names())
            .finish()
    }
}
