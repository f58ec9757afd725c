//! Core data model types for the ingest crate.
//!
//! ```text
//! source file / in-memory text
//!
//!         ↓ load_policy() / policy_from_text()
//!
//! PolicyDocument
//! ├── policy_id: String      (opaque, sanitized)
//! ├── party_type: PartyType  (1P / 3P, propagated only)
//! └── raw_text: String       (line structure preserved)
//! ```
//!
//! A [`PolicyDocument`] is created once and then handed read-only to the
//! segmentation and chunking stages. Nothing downstream mutates it.
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// Whether a policy belongs to the site owner or to an embedded third party.
///
/// The tag is carried through to every chunk and never interpreted by the
/// pipeline itself.
///
/// ```rust
/// use ingest::PartyType;
///
/// let party: PartyType = "3P".parse().unwrap();
/// assert_eq!(party, PartyType::ThirdParty);
/// assert_eq!(party.to_string(), "3P");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PartyType {
    #[serde(rename = "1P")]
    FirstParty,
    #[serde(rename = "3P")]
    ThirdParty,
}

impl PartyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyType::FirstParty => "1P",
            PartyType::ThirdParty => "3P",
        }
    }
}

impl fmt::Display for PartyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartyType {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1P" => Ok(PartyType::FirstParty),
            "3P" => Ok(PartyType::ThirdParty),
            other => Err(IngestError::InvalidMetadata(format!(
                "party_type must be 1P or 3P, got {other:?}"
            ))),
        }
    }
}

/// One privacy policy, already reduced to text.
///
/// `raw_text` keeps its line breaks: headings, lists, and blank-line
/// separation are the only structural evidence segmentation has, and every
/// section and chunk offset points into this exact string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyDocument {
    /// Opaque policy identifier, copied onto every chunk.
    pub policy_id: String,
    /// First- or third-party tag, copied onto every chunk.
    pub party_type: PartyType,
    /// Full extracted text of the policy.
    pub raw_text: String,
}

impl PolicyDocument {
    /// Wraps already-normalized text without further checks.
    ///
    /// Use [`policy_from_text`](crate::policy_from_text) when the text still
    /// needs ingest hygiene (BOM, line endings, control characters, limits).
    pub fn new(
        policy_id: impl Into<String>,
        party_type: PartyType,
        raw_text: impl Into<String>,
    ) -> Self {
        Self {
            policy_id: policy_id.into(),
            party_type,
            raw_text: raw_text.into(),
        }
    }

    /// Byte length of `raw_text`; the exclusive upper bound for every offset.
    pub fn len(&self) -> usize {
        self.raw_text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_text.is_empty()
    }
}

/// Source formats recognised by [`load_policy`](crate::load_policy).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SourceFormat {
    PlainText,
    Markdown,
    Html,
    Pdf,
}

impl SourceFormat {
    /// Infers the format from a file extension (case-insensitive).
    ///
    /// ```rust
    /// use ingest::SourceFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(SourceFormat::from_path(Path::new("a/policy.HTM")), Some(SourceFormat::Html));
    /// assert_eq!(SourceFormat::from_path(Path::new("policy")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" | "text" => Some(SourceFormat::PlainText),
            "md" | "markdown" => Some(SourceFormat::Markdown),
            "html" | "htm" | "xhtml" => Some(SourceFormat::Html),
            "pdf" => Some(SourceFormat::Pdf),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::PlainText => "plain_text",
            SourceFormat::Markdown => "markdown",
            SourceFormat::Html => "html",
            SourceFormat::Pdf => "pdf",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn party_type_parses_case_insensitively() {
        assert_eq!("1p".parse::<PartyType>().unwrap(), PartyType::FirstParty);
        assert_eq!(" 3P ".parse::<PartyType>().unwrap(), PartyType::ThirdParty);
        assert!(matches!(
            "2P".parse::<PartyType>(),
            Err(IngestError::InvalidMetadata(_))
        ));
    }

    #[test]
    fn party_type_serializes_as_tag() {
        let json = serde_json::to_string(&PartyType::FirstParty).unwrap();
        assert_eq!(json, "\"1P\"");
        let back: PartyType = serde_json::from_str("\"3P\"").unwrap();
        assert_eq!(back, PartyType::ThirdParty);
    }

    #[test]
    fn document_len_is_byte_length() {
        let doc = PolicyDocument::new("p", PartyType::FirstParty, "caf\u{e9}");
        assert_eq!(doc.len(), 5);
        assert!(!doc.is_empty());
    }

    #[test]
    fn source_format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("x.md")),
            Some(SourceFormat::Markdown)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("x.TXT")),
            Some(SourceFormat::PlainText)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("x.pdf")),
            Some(SourceFormat::Pdf)
        );
        assert_eq!(SourceFormat::from_path(Path::new("x.docx")), None);
    }
}
