//! Error types produced by the ingest crate.
//!
//! Ingestion is the only stage of the policy pipeline that touches the
//! filesystem or decodes source formats, so it is also the only stage that
//! fails loudly. Errors are typed, cloneable, and comparable so callers can
//! branch on them and tests can assert on them.
//!
//! # Error Categories
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`Io`](IngestError::Io) | I/O | Source file could not be read |
//! | [`UnsupportedFormat`](IngestError::UnsupportedFormat) | Format | No extraction path for this source format |
//! | [`InvalidUtf8`](IngestError::InvalidUtf8) | Format | Text source is not valid UTF-8 |
//! | [`Extraction`](IngestError::Extraction) | Format | HTML extraction produced no text |
//! | [`InvalidMetadata`](IngestError::InvalidMetadata) | Validation | Policy id or party type rejected |
//! | [`PayloadTooLarge`](IngestError::PayloadTooLarge) | Validation | Size limit exceeded |
//!
//! # Examples
//!
//! ```rust
//! use ingest::{policy_from_text, IngestConfig, IngestError, PartyType};
//!
//! let cfg = IngestConfig {
//!     max_payload_bytes: Some(4),
//!     ..IngestConfig::default()
//! };
//!
//! match policy_from_text("acme", PartyType::FirstParty, "far too long", &cfg) {
//!     Err(IngestError::PayloadTooLarge(msg)) => assert!(msg.contains("exceeds")),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```
use thiserror::Error;

/// Errors that can occur while loading or normalizing a policy document.
///
/// The enum is marked `#[non_exhaustive]`; callers should keep a catch-all
/// arm when matching.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// The source file could not be read.
    ///
    /// The underlying `std::io::Error` is flattened into a message so the
    /// error stays `Clone + Eq`.
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// The source format has no extraction path in this crate.
    ///
    /// PDF and other binary formats are handled by external extraction
    /// tooling; hand the extracted text to
    /// [`policy_from_text`](crate::policy_from_text) instead.
    #[error("unsupported source format: {0}")]
    UnsupportedFormat(String),

    /// A text or markup source did not decode as UTF-8.
    #[error("invalid utf-8 in source: {0}")]
    InvalidUtf8(String),

    /// HTML extraction yielded no usable text.
    #[error("text extraction failed: {0}")]
    Extraction(String),

    /// The policy id or party type was rejected.
    ///
    /// ```rust
    /// use ingest::IngestError;
    ///
    /// let err = IngestError::InvalidMetadata("policy_id empty".to_string());
    /// assert_eq!(err.to_string(), "invalid metadata: policy_id empty");
    /// ```
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),

    /// The raw payload exceeds [`IngestConfig::max_payload_bytes`](crate::IngestConfig::max_payload_bytes).
    #[error("payload exceeds size limit: {0}")]
    PayloadTooLarge(String),
}

impl IngestError {
    /// Builds an [`IngestError::Io`] from a path and the I/O failure.
    pub(crate) fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        IngestError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    /// Returns true if the failure comes from the source itself (format,
    /// encoding, size) rather than from the environment.
    ///
    /// ```rust
    /// use ingest::IngestError;
    ///
    /// assert!(IngestError::UnsupportedFormat("pdf".into()).is_source_error());
    /// assert!(!IngestError::Io { path: "p".into(), message: "m".into() }.is_source_error());
    /// ```
    pub fn is_source_error(&self) -> bool {
        !matches!(self, IngestError::Io { .. })
    }
}

/// Errors surfaced by a [`TextExtractor`](crate::TextExtractor) strategy.
///
/// Extraction failures are recovered inside
/// [`FallbackExtractor`](crate::FallbackExtractor); they only escape when every
/// strategy fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{strategy} extraction failed: {message}")]
pub struct ExtractError {
    /// Name of the strategy that failed.
    pub strategy: &'static str,
    /// Human-readable failure description.
    pub message: String,
}

impl ExtractError {
    pub fn new(strategy: &'static str, message: impl Into<String>) -> Self {
        Self {
            strategy,
            message: message.into(),
        }
    }
}
