//! Policy chunking.
//!
//! Turns a [`PolicyDocument`] into a lazy, ordered sequence of
//! [`PolicyChunk`]s sized for retrieval, each tagged with the section it came
//! from and identified by a SHA-256 of its text.
//!
//! ## Guarantees
//!
//! - Chunks come out in document order, ascending by offset within a section
//! - A chunk lies inside its section's range and never crosses into another
//!   section's own text
//! - Every byte of `raw_text` is covered; removing the overlap between
//!   consecutive chunks and concatenating reproduces `raw_text`
//! - Empty text still yields one (empty) chunk
//! - `chunk_hash` depends only on the chunk text
//!
//! ```rust
//! use chunk::chunk_policy;
//! use ingest::{PartyType, PolicyDocument};
//!
//! let doc = PolicyDocument::new(
//!     "acme",
//!     PartyType::ThirdParty,
//!     "# Intro\nHello\n## Details\nWorld\n",
//! );
//! let chunks: Vec<_> = chunk_policy(&doc).collect();
//!
//! assert_eq!(chunks.len(), 2);
//! assert_eq!((chunks[1].char_start, chunks[1].char_end), (14, 31));
//! assert_eq!(chunks[1].text, "## Details\nWorld\n");
//! assert_eq!(chunks[1].section_path, "Intro > Details");
//! ```

mod chunker;
mod config;
mod hash;
mod types;

use ingest::PolicyDocument;

pub use crate::chunker::{Chunker, PolicyChunks};
pub use crate::config::{ChunkConfig, ChunkError};
pub use crate::hash::hash_text;
pub use crate::types::PolicyChunk;

/// Chunks `document` with default section and chunk settings.
pub fn chunk_policy(document: &PolicyDocument) -> PolicyChunks<'_> {
    Chunker::default().chunk(document)
}
