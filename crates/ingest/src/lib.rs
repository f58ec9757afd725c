//! Policy Ingest Layer
//!
//! This is where policy text enters the pipeline. We take a source file (or
//! text already in memory), decide how to get text out of it, apply the
//! minimal hygiene that keeps offsets honest, and hand back an immutable
//! [`PolicyDocument`].
//!
//! ## What we do here
//!
//! - **Pick a format** - `.txt`/`.md` are read as-is, `.html` goes through a
//!   [`TextExtractor`], `.pdf` is refused (binary extraction lives elsewhere).
//! - **Keep structure** - line breaks, blank lines, and markup survive; only
//!   BOMs, carriage returns, and stray control characters are removed.
//! - **Name the policy** - file stem, or a UUIDv5 of the path when the stem is
//!   empty. Same path = same id, every time.
//! - **Enforce limits** - optional raw payload cap.
//! - **Log everything** - `ingest_success` / `ingest_failure` events via tracing.
//!
//! ## Example
//!
//! ```
//! use ingest::{policy_from_text, IngestConfig, PartyType};
//!
//! let cfg = IngestConfig::default();
//! let doc = policy_from_text("acme", PartyType::FirstParty, "# Intro\r\nHello\r\n", &cfg).unwrap();
//!
//! assert_eq!(doc.policy_id, "acme");
//! assert_eq!(doc.raw_text, "# Intro\nHello\n");
//! ```
use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::{info, warn, Level};

mod config;
mod error;
mod extract;
mod metadata;
mod text;
mod types;

use crate::metadata::{derive_policy_id, sanitize_required_field};
use crate::text::enforce_payload_limit;

pub use crate::config::{ConfigError, IngestConfig};
pub use crate::error::{ExtractError, IngestError};
pub use crate::extract::{extract_main_text, FallbackExtractor, TextDumpExtractor, TextExtractor};
pub use crate::text::normalize_policy_text;
pub use crate::types::{PartyType, PolicyDocument, SourceFormat};

/// Build a [`PolicyDocument`] from text that is already in memory.
///
/// Empty text is accepted: it flows through the pipeline as a zero-length
/// document rather than failing here.
pub fn policy_from_text(
    policy_id: impl Into<String>,
    party_type: PartyType,
    text: &str,
    cfg: &IngestConfig,
) -> Result<PolicyDocument, IngestError> {
    let policy_id = sanitize_required_field("policy_id", policy_id.into(), cfg.strip_control_chars)?;
    enforce_payload_limit(text.len(), cfg)?;
    let raw_text = normalize_policy_text(text, cfg);
    Ok(PolicyDocument {
        policy_id,
        party_type,
        raw_text,
    })
}

/// Load a policy file, extracting HTML with the built-in [`TextDumpExtractor`].
pub fn load_policy(
    source_path: impl AsRef<Path>,
    party_type: PartyType,
    cfg: &IngestConfig,
) -> Result<PolicyDocument, IngestError> {
    load_policy_with_extractor(source_path, party_type, cfg, &TextDumpExtractor)
}

/// Load a policy file, extracting HTML with the given strategy.
///
/// Files without a recognised extension are read as plain text.
pub fn load_policy_with_extractor(
    source_path: impl AsRef<Path>,
    party_type: PartyType,
    cfg: &IngestConfig,
    extractor: &dyn TextExtractor,
) -> Result<PolicyDocument, IngestError> {
    let start = Instant::now();
    let path = source_path.as_ref();
    let format = SourceFormat::from_path(path).unwrap_or(SourceFormat::PlainText);

    let span = tracing::span!(
        Level::INFO,
        "ingest.load_policy",
        path = %path.display(),
        format = format.as_str()
    );
    let _guard = span.enter();

    match load_inner(path, format, party_type, cfg, extractor) {
        Ok(doc) => {
            info!(
                policy_id = %doc.policy_id,
                party_type = %doc.party_type,
                text_len = doc.raw_text.len(),
                elapsed_micros = start.elapsed().as_micros(),
                "ingest_success"
            );
            Ok(doc)
        }
        Err(err) => {
            warn!(
                error = %err,
                elapsed_micros = start.elapsed().as_micros(),
                "ingest_failure"
            );
            Err(err)
        }
    }
}

fn load_inner(
    path: &Path,
    format: SourceFormat,
    party_type: PartyType,
    cfg: &IngestConfig,
    extractor: &dyn TextExtractor,
) -> Result<PolicyDocument, IngestError> {
    if format == SourceFormat::Pdf {
        return Err(IngestError::UnsupportedFormat(format!(
            "{} sources need an external extractor; pass extracted text to policy_from_text",
            format.as_str()
        )));
    }

    let bytes = fs::read(path).map_err(|err| IngestError::io(path, &err))?;
    // Limit the raw bytes before decoding or extraction does any work.
    enforce_payload_limit(bytes.len(), cfg)?;
    let source = String::from_utf8(bytes).map_err(|err| IngestError::InvalidUtf8(err.to_string()))?;

    let text = match format {
        SourceFormat::Html => {
            extract_main_text(Some(&source), None, extractor).ok_or_else(|| {
                IngestError::Extraction(format!("{} produced no text", extractor.name()))
            })?
        }
        _ => source,
    };

    policy_from_text(derive_policy_id(path, cfg), party_type, &text, cfg)
}
