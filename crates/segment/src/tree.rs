//! Section tree construction.
//!
//! One pass over the document's lines with a stack of open sections. A
//! heading at level `L` closes every open section at level `>= L` (their end
//! is the heading's line start) and opens a new one whose path is the
//! remaining stack plus its own title. Whatever is still open at the end of
//! input closes at `text.len()`.
//!
//! Open sections live in a builder-local list of pending nodes; public
//! [`Section`] values are only produced once every end offset is known.
use std::iter;
use std::time::Instant;

use tracing::{debug, trace};

use crate::classifier::{HeadingCandidate, HeadingClassifier, LineContext, TocTitleRule};
use crate::config::{SegmentConfig, SegmentConfigError};
use crate::lines::{split_lines, Line};
use crate::section::{section_id, Section, DOCUMENT_TITLE, SECTION_PATH_SEPARATOR};

/// Builds section trees with a fixed configuration.
///
/// ```rust
/// use segment::{SectionTreeBuilder, SegmentConfig};
///
/// let builder = SectionTreeBuilder::new(SegmentConfig::default()).unwrap();
/// let sections = builder.build("# Intro\nHello\n## Details\nWorld\n");
///
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[1].section_path, "Intro > Details");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SectionTreeBuilder {
    config: SegmentConfig,
}

struct PendingSection {
    title: String,
    level: u8,
    path: String,
    start: usize,
    end: Option<usize>,
}

impl SectionTreeBuilder {
    pub fn new(config: SegmentConfig) -> Result<Self, SegmentConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    /// Builds the section list for `text`. Never empty, never fails.
    pub fn build(&self, text: &str) -> Vec<Section> {
        let started = Instant::now();
        let lines = split_lines(text);
        let toc = TocTitleRule::from_lines(&lines, &self.config);
        let toc_titles = toc.len();
        let classifier = HeadingClassifier::with_toc(toc, &self.config);

        let mut pending: Vec<PendingSection> = Vec::new();
        let mut open: Vec<usize> = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            if line.is_blank() {
                continue;
            }
            let Some(heading) = classifier.classify(&line_context(&lines, idx)) else {
                continue;
            };
            trace!(
                line = idx,
                offset = line.start,
                level = heading.level,
                evidence = %heading.evidence,
                title = %heading.title,
                "heading_detected"
            );
            open_section(&mut pending, &mut open, heading, line.start);
        }

        let heading_count = pending.len();
        let sections = finish(pending, text);
        debug!(
            text_len = text.len(),
            line_count = lines.len(),
            toc_titles,
            heading_count,
            section_count = sections.len(),
            elapsed_micros = started.elapsed().as_micros(),
            "section_tree_built"
        );
        sections
    }
}

fn line_context<'a>(lines: &[Line<'a>], idx: usize) -> LineContext<'a> {
    LineContext {
        text: lines[idx].text,
        prev_blank: idx == 0 || lines[idx - 1].is_blank(),
        next_blank: lines.get(idx + 1).map_or(true, Line::is_blank),
    }
}

fn open_section(
    pending: &mut Vec<PendingSection>,
    open: &mut Vec<usize>,
    heading: HeadingCandidate,
    start: usize,
) {
    while let Some(&top) = open.last() {
        if pending[top].level < heading.level {
            break;
        }
        pending[top].end = Some(start);
        open.pop();
    }

    let path = open
        .iter()
        .map(|&i| pending[i].title.as_str())
        .chain(iter::once(heading.title.as_str()))
        .collect::<Vec<_>>()
        .join(SECTION_PATH_SEPARATOR);

    pending.push(PendingSection {
        title: heading.title,
        level: heading.level,
        path,
        start,
        end: None,
    });
    open.push(pending.len() - 1);
}

/// Closes open sections at the end of text, settles leading text, and
/// numbers everything.
fn finish(mut pending: Vec<PendingSection>, text: &str) -> Vec<Section> {
    let Some(first_start) = pending.first().map(|p| p.start) else {
        return vec![Section::document(1, 0, text.len())];
    };

    if first_start > 0 {
        if text[..first_start].trim().is_empty() {
            pending[0].start = 0;
        } else {
            pending.insert(
                0,
                PendingSection {
                    title: DOCUMENT_TITLE.to_string(),
                    level: 1,
                    path: DOCUMENT_TITLE.to_string(),
                    start: 0,
                    end: Some(first_start),
                },
            );
        }
    }

    pending
        .into_iter()
        .enumerate()
        .map(|(idx, p)| Section {
            section_id: section_id(idx + 1),
            title: p.title,
            level: p.level,
            section_path: p.path,
            start_offset: p.start,
            end_offset: p.end.unwrap_or(text.len()),
        })
        .collect()
}
