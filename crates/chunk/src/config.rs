//! Chunk sizing.
//!
//! Sizes are UTF-8 byte counts. Windows never split a character, so a chunk
//! can come out a few bytes shorter than `max_chunk_bytes`, and word-boundary
//! snapping can shorten it by up to `boundary_lookback` more.
//!
//! ```rust
//! use chunk::ChunkConfig;
//!
//! let cfg = ChunkConfig::default()
//!     .with_max_chunk_bytes(800)
//!     .with_overlap_bytes(100);
//! assert!(cfg.validate().is_ok());
//! assert_eq!(cfg.stride(), 700);
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChunkConfig {
    /// Upper bound on a chunk's length. Sections whose own text fits are
    /// emitted as a single chunk.
    ///
    /// Default: `1200`
    pub max_chunk_bytes: usize,

    /// Bytes shared by consecutive windows of one section. Must be smaller
    /// than `max_chunk_bytes`.
    ///
    /// Default: `200`
    pub overlap_bytes: usize,

    /// How far a window edge may move to land on a word boundary. `0`
    /// disables snapping.
    ///
    /// Default: `64`
    pub boundary_lookback: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_bytes: 1200,
            overlap_bytes: 200,
            boundary_lookback: 64,
        }
    }
}

impl ChunkConfig {
    pub fn with_max_chunk_bytes(mut self, max: usize) -> Self {
        self.max_chunk_bytes = max;
        self
    }

    pub fn with_overlap_bytes(mut self, overlap: usize) -> Self {
        self.overlap_bytes = overlap;
        self
    }

    pub fn with_boundary_lookback(mut self, lookback: usize) -> Self {
        self.boundary_lookback = lookback;
        self
    }

    /// Nominal advance between window starts.
    pub fn stride(&self) -> usize {
        self.max_chunk_bytes.saturating_sub(self.overlap_bytes)
    }

    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.max_chunk_bytes == 0 {
            return Err(ChunkError::ZeroChunkSize);
        }
        if self.overlap_bytes >= self.max_chunk_bytes {
            return Err(ChunkError::OverlapTooLarge {
                overlap: self.overlap_bytes,
                max: self.max_chunk_bytes,
            });
        }
        Ok(())
    }
}

/// Errors raised before any chunk is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChunkError {
    #[error("max_chunk_bytes must be >= 1")]
    ZeroChunkSize,
    #[error("overlap_bytes ({overlap}) must be smaller than max_chunk_bytes ({max})")]
    OverlapTooLarge { overlap: usize, max: usize },
    #[error("section {section_id} range {start}..{end} does not fit a {text_len}-byte document")]
    SectionOutOfBounds {
        section_id: String,
        start: usize,
        end: usize,
        text_len: usize,
    },
    #[error("section {section_id} starts at {start}, before the previous section ({previous_start})")]
    SectionsOutOfOrder {
        section_id: String,
        start: usize,
        previous_start: usize,
    },
}
