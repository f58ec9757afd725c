//! Section-aware windowing.
//!
//! Each section contributes its own text (its body: from its heading up to
//! the next section's heading) and nothing else, so a chunk never crosses a
//! section boundary and nested sections never emit the same text twice.
//!
//! Inside a body:
//!
//! - a body of at most `max_chunk_bytes` is one chunk (even when empty)
//! - longer bodies are cut into windows of at most `max_chunk_bytes`, each
//!   starting `overlap_bytes` before the previous one ended
//! - window ends move back to just after whitespace, and window starts move
//!   forward to a word start, when one is within `boundary_lookback`
//! - the last window ends exactly at the body end
//!
//! Dropping each chunk's overlap with its predecessor and concatenating the
//! rest reproduces `raw_text` byte for byte.
use std::iter::FusedIterator;
use std::ops::Range;

use ingest::PolicyDocument;
use segment::{section_bodies, Section, SectionTreeBuilder};
use tracing::trace;

use crate::config::{ChunkConfig, ChunkError};
use crate::hash::hash_text;
use crate::types::PolicyChunk;

/// Chunks documents with a fixed configuration.
///
/// ```rust
/// use chunk::{ChunkConfig, Chunker};
/// use ingest::{PartyType, PolicyDocument};
///
/// let chunker = Chunker::new(ChunkConfig::default()).unwrap();
/// let doc = PolicyDocument::new("acme", PartyType::FirstParty, "# Intro\nHello\n## Details\nWorld\n");
/// let chunks: Vec<_> = chunker.chunk(&doc).collect();
///
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].text, "# Intro\nHello\n");
/// assert_eq!(chunks[1].section_path, "Intro > Details");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Chunker {
    config: ChunkConfig,
    segmenter: SectionTreeBuilder,
}

impl Chunker {
    pub fn new(config: ChunkConfig) -> Result<Self, ChunkError> {
        config.validate()?;
        Ok(Self {
            config,
            segmenter: SectionTreeBuilder::default(),
        })
    }

    /// Replaces the section tree builder used by [`Chunker::chunk`].
    pub fn with_segmenter(mut self, segmenter: SectionTreeBuilder) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Builds the document's section tree and chunks it lazily.
    pub fn chunk<'a>(&self, document: &'a PolicyDocument) -> PolicyChunks<'a> {
        let sections = self.segmenter.build(&document.raw_text);
        PolicyChunks::new(document, sections, self.config)
    }

    /// Chunks against a section list built earlier, for callers that also
    /// keep the sections.
    ///
    /// The list must come from this document's text: every range has to lie
    /// on character boundaries of `raw_text`, and sections must be in
    /// document order (non-decreasing `start_offset`).
    pub fn chunk_sections<'a>(
        &self,
        document: &'a PolicyDocument,
        sections: Vec<Section>,
    ) -> Result<PolicyChunks<'a>, ChunkError> {
        if let Some(bad) = sections.iter().find(|s| s.text(&document.raw_text).is_none()) {
            return Err(ChunkError::SectionOutOfBounds {
                section_id: bad.section_id.clone(),
                start: bad.start_offset,
                end: bad.end_offset,
                text_len: document.len(),
            });
        }
        if let Some(pair) = sections
            .windows(2)
            .find(|pair| pair[1].start_offset < pair[0].start_offset)
        {
            return Err(ChunkError::SectionsOutOfOrder {
                section_id: pair[1].section_id.clone(),
                start: pair[1].start_offset,
                previous_start: pair[0].start_offset,
            });
        }
        Ok(PolicyChunks::new(document, sections, self.config))
    }
}

/// Lazy chunk sequence for one document, in document order.
#[derive(Debug, Clone)]
pub struct PolicyChunks<'a> {
    document: &'a PolicyDocument,
    sections: Vec<Section>,
    bodies: Vec<Range<usize>>,
    config: ChunkConfig,
    section_idx: usize,
    cursor: Option<usize>,
}

impl<'a> PolicyChunks<'a> {
    fn new(document: &'a PolicyDocument, sections: Vec<Section>, config: ChunkConfig) -> Self {
        let bodies = section_bodies(&sections);
        Self {
            document,
            sections,
            bodies,
            config,
            section_idx: 0,
            cursor: None,
        }
    }

    /// Sections the chunks are cut from.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

impl Iterator for PolicyChunks<'_> {
    type Item = PolicyChunk;

    fn next(&mut self) -> Option<PolicyChunk> {
        let section = self.sections.get(self.section_idx)?;
        let body = self.bodies[self.section_idx].clone();
        let text = self.document.raw_text.as_str();

        let start = self.cursor.unwrap_or(body.start);
        let end = window_end(text, start, body.end, &self.config);
        if end >= body.end {
            self.section_idx += 1;
            self.cursor = None;
        } else {
            self.cursor = Some(next_start(text, start, end, &self.config));
        }

        let slice = &text[start..end];
        trace!(
            section_id = %section.section_id,
            char_start = start,
            char_end = end,
            "chunk_emitted"
        );
        Some(PolicyChunk {
            policy_id: self.document.policy_id.clone(),
            party_type: self.document.party_type,
            section_id: section.section_id.clone(),
            section_path: section.section_path.clone(),
            char_start: start,
            char_end: end,
            chunk_hash: hash_text(slice),
            text: slice.to_string(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every remaining section yields at least one chunk.
        let remaining = self.sections.len() - self.section_idx;
        (remaining, None)
    }
}

impl FusedIterator for PolicyChunks<'_> {}

/// End of the window starting at `start` in a body ending at `limit`.
fn window_end(text: &str, start: usize, limit: usize, cfg: &ChunkConfig) -> usize {
    let hard = start.saturating_add(cfg.max_chunk_bytes);
    if hard >= limit {
        return limit;
    }
    let mut hard = floor_char_boundary(text, hard);
    if hard <= start {
        // A single character wider than the window.
        hard = ceil_char_boundary(text, start + 1);
    }
    if at_word_boundary(text, hard) {
        return hard;
    }

    let floor = ceil_char_boundary(
        text,
        hard.saturating_sub(cfg.boundary_lookback)
            .max(start.saturating_add(cfg.overlap_bytes).saturating_add(1)),
    );
    if floor >= hard {
        return hard;
    }
    text[floor..hard]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(hard, |(i, c)| floor + i + c.len_utf8())
}

/// Start of the window after `start..end`. Always in `start + 1..=end`.
fn next_start(text: &str, start: usize, end: usize, cfg: &ChunkConfig) -> usize {
    let next = floor_char_boundary(text, end.saturating_sub(cfg.overlap_bytes));
    if next <= start {
        return end;
    }
    if at_word_boundary(text, next) {
        return next;
    }

    let limit = floor_char_boundary(text, next.saturating_add(cfg.boundary_lookback).min(end));
    if limit <= next {
        return next;
    }
    let window = &text[next..limit];
    let Some(space) = window.find(char::is_whitespace) else {
        return next;
    };
    window[space..]
        .find(|c: char| !c.is_whitespace())
        .map_or(limit, |word| next + space + word)
}

/// True unless `idx` falls between two non-whitespace characters.
fn at_word_boundary(text: &str, idx: usize) -> bool {
    let before = text[..idx].chars().next_back();
    let after = text[idx..].chars().next();
    match (before, after) {
        (Some(b), Some(a)) => b.is_whitespace() || a.is_whitespace(),
        _ => true,
    }
}

fn floor_char_boundary(text: &str, idx: usize) -> usize {
    let mut idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(text: &str, idx: usize) -> usize {
    let mut idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}
