//! Chunk content hashing.
//!
//! ```text
//! chunk_hash = hex(SHA-256(chunk_text_bytes))
//! ```
//!
//! No version or provenance is mixed in: identical text hashes identically
//! across sections, documents, and runs, which is what makes the hash usable
//! for exact-duplicate detection.
//!
//! ```rust
//! use chunk::hash_text;
//!
//! let hash = hash_text("We collect data.");
//! assert_eq!(hash.len(), 64);
//! assert_eq!(hash, hash_text("We collect data."));
//! ```
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `text`.
pub fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
