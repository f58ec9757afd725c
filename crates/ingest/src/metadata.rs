//! Policy id sanitization and derivation.
use std::path::Path;

use crate::config::IngestConfig;
use crate::error::IngestError;

/// Strips control characters (when configured) and trims; `None` when
/// nothing is left.
///
/// ```rust,ignore
/// assert_eq!(sanitize_optional_string(Some("  acme\u{7} ".into()), true), Some("acme".into()));
/// assert_eq!(sanitize_optional_string(Some("   ".into()), true), None);
/// ```
pub(crate) fn sanitize_optional_string(
    value: Option<String>,
    strip_control: bool,
) -> Option<String> {
    value.and_then(|raw| {
        let filtered = if strip_control {
            raw.chars().filter(|c| !c.is_control()).collect::<String>()
        } else {
            raw
        };
        let trimmed = filtered.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Sanitizes a field that must end up non-empty.
pub(crate) fn sanitize_required_field(
    field: &str,
    value: String,
    strip_control: bool,
) -> Result<String, IngestError> {
    sanitize_optional_string(Some(value), strip_control)
        .ok_or_else(|| IngestError::InvalidMetadata(format!("{field} empty")))
}

/// Derives a policy id for a source file.
///
/// The file stem is used when it survives sanitization; otherwise the id is
/// `UUIDv5(policy_id_namespace, path)`, which is stable for a given path.
pub(crate) fn derive_policy_id(path: &Path, cfg: &IngestConfig) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned());
    sanitize_optional_string(stem, cfg.strip_control_chars).unwrap_or_else(|| {
        let material = path.to_string_lossy();
        uuid::Uuid::new_v5(&cfg.policy_id_namespace, material.as_bytes()).to_string()
    })
}
