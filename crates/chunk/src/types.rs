use std::ops::Range;

use ingest::PartyType;
use serde::{Deserialize, Serialize};

/// A bounded slice of a policy with its full provenance.
///
/// `char_start..char_end` is an absolute byte range into the document's
/// `raw_text` (not relative to the section), and `text` is exactly that
/// slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyChunk {
    pub policy_id: String,
    pub party_type: PartyType,
    /// Id of the section whose own text this chunk was cut from.
    pub section_id: String,
    pub section_path: String,
    pub char_start: usize,
    pub char_end: usize,
    /// Lowercase hex SHA-256 of `text`.
    pub chunk_hash: String,
    pub text: String,
}

impl PolicyChunk {
    pub fn span(&self) -> Range<usize> {
        self.char_start..self.char_end
    }

    pub fn len(&self) -> usize {
        self.char_end - self.char_start
    }

    pub fn is_empty(&self) -> bool {
        self.char_start == self.char_end
    }
}
