//! Text hygiene applied to raw policy text before segmentation.
//!
//! Unlike generic payload normalization, nothing here collapses whitespace:
//! a heading is only recognizable by the blank lines around it, and every
//! downstream offset must point into the exact string produced here.
use crate::config::IngestConfig;
use crate::error::IngestError;

const BOM: char = '\u{feff}';

/// Rejects payloads above [`IngestConfig::max_payload_bytes`].
pub(crate) fn enforce_payload_limit(len: usize, cfg: &IngestConfig) -> Result<(), IngestError> {
    if let Some(limit) = cfg.max_payload_bytes {
        if len > limit {
            return Err(IngestError::PayloadTooLarge(format!(
                "raw payload size {len} exceeds limit of {limit}"
            )));
        }
    }
    Ok(())
}

/// Applies BOM stripping, line-ending normalization, and control-character
/// removal as configured.
///
/// `\n` and `\t` always survive; they carry layout.
pub fn normalize_policy_text(text: &str, cfg: &IngestConfig) -> String {
    let text = if cfg.strip_bom {
        text.strip_prefix(BOM).unwrap_or(text)
    } else {
        text
    };

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' if cfg.normalize_line_endings => {
                // CRLF collapses to one LF; a lone CR becomes LF.
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            '\n' | '\t' => out.push(ch),
            c if cfg.strip_control_chars && c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}
