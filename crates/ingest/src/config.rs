//! Configuration types for policy ingestion.
//!
//! [`IngestConfig`] controls the text hygiene applied before a document
//! enters segmentation and the limits enforced on raw input. It is cheap to
//! clone and deserializes from the `ingest:` block of the pipeline YAML file.
//!
//! # Quick Start
//!
//! ```rust
//! use ingest::IngestConfig;
//!
//! let config = IngestConfig::default();
//! config.validate().expect("default config is valid");
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Runtime configuration for ingest behavior.
///
/// Whitespace inside lines is never collapsed: segmentation depends on line
/// boundaries and blank-line isolation, so ingest only touches bytes that
/// would otherwise corrupt offsets (BOM, carriage returns, control chars).
///
/// ```json
/// {
///   "version": 1,
///   "strip_control_chars": true,
///   "normalize_line_endings": true,
///   "strip_bom": true,
///   "max_payload_bytes": 10485760
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestConfig {
    /// Semantic version of the ingest configuration.
    ///
    /// Default: `1`
    pub version: u32,

    /// Namespace UUID used to derive a policy id when a file stem is empty.
    ///
    /// The id is `UUIDv5(policy_id_namespace, path)`, so the same path always
    /// maps to the same id.
    ///
    /// Default: [`Uuid::NAMESPACE_URL`]
    pub policy_id_namespace: Uuid,

    /// Remove control characters other than `\n` and `\t` from the text and
    /// from the policy id.
    ///
    /// Default: `true`
    pub strip_control_chars: bool,

    /// Convert `\r\n` and lone `\r` to `\n`.
    ///
    /// Default: `true`
    pub normalize_line_endings: bool,

    /// Drop a leading U+FEFF byte-order mark.
    ///
    /// Default: `true`
    pub strip_bom: bool,

    /// Maximum raw payload byte length allowed.
    ///
    /// Checked before any normalization. Default: `None` (unlimited)
    #[serde(default)]
    pub max_payload_bytes: Option<usize>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            version: 1,
            policy_id_namespace: Uuid::NAMESPACE_URL,
            strip_control_chars: true,
            normalize_line_endings: true,
            strip_bom: true,
            max_payload_bytes: None,
        }
    }
}

impl IngestConfig {
    /// Set the raw payload limit.
    pub fn with_max_payload_bytes(mut self, limit: Option<usize>) -> Self {
        self.max_payload_bytes = limit;
        self
    }

    /// Enable or disable control-character stripping.
    pub fn with_strip_control_chars(mut self, strip: bool) -> Self {
        self.strip_control_chars = strip;
        self
    }

    /// Enable or disable line-ending normalization.
    pub fn with_normalize_line_endings(mut self, normalize: bool) -> Self {
        self.normalize_line_endings = normalize;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 {
            return Err(ConfigError::InvalidVersion);
        }
        if self.max_payload_bytes == Some(0) {
            return Err(ConfigError::ZeroPayloadLimit);
        }
        Ok(())
    }
}

/// Reasons an [`IngestConfig`] is rejected by [`IngestConfig::validate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("ingest config version must be >= 1")]
    InvalidVersion,
    #[error("max_payload_bytes must be > 0 when set; use None for unlimited")]
    ZeroPayloadLimit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = IngestConfig::default();
        assert_eq!(cfg.version, 1);
        assert!(cfg.strip_control_chars);
        assert!(cfg.normalize_line_endings);
        assert!(cfg.strip_bom);
        assert!(cfg.max_payload_bytes.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_version_rejected() {
        let cfg = IngestConfig {
            version: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidVersion));
    }

    #[test]
    fn zero_payload_limit_rejected() {
        let cfg = IngestConfig::default().with_max_payload_bytes(Some(0));
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroPayloadLimit));
    }

    #[test]
    fn serde_roundtrip_keeps_limits() {
        let cfg = IngestConfig::default()
            .with_max_payload_bytes(Some(1024))
            .with_strip_control_chars(false);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: IngestConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
