//! YAML configuration file support.
//!
//! One file describes every stage of the pipeline. Every field has a serde
//! default, so a file only needs the values it changes.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # policyseg pipeline configuration
//! version: "1.0"
//! name: "crawler-defaults"
//!
//! ingest:
//!   version: 1
//!   policy_id_namespace: "6ba7b811-9dad-11d1-80b4-00c04fd430c8"
//!   strip_control_chars: true
//!   normalize_line_endings: true
//!   strip_bom: true
//!   max_payload_bytes: 10485760
//!
//! segment:
//!   title_case_ratio: 0.6
//!   max_heading_chars: 90
//!   heuristic_level: 2
//!   toc_level: 2
//!   toc_scan_lines: 30
//!   toc_gap_limit: 6
//!
//! chunk:
//!   max_chunk_bytes: 1200
//!   overlap_bytes: 200
//!   boundary_lookback: 64
//! ```

use std::fs;
use std::path::Path;

use chunk::ChunkConfig;
use ingest::IngestConfig;
use segment::SegmentConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::PipelineConfig;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for the whole pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PolicysegConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub ingest: IngestYamlConfig,

    #[serde(default)]
    pub segment: SegmentYamlConfig,

    #[serde(default)]
    pub chunk: ChunkYamlConfig,
}

impl PolicysegConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PolicysegConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.pipeline_config().map(|_| ())
    }

    /// Converts the file into validated stage configurations.
    pub fn pipeline_config(&self) -> Result<PipelineConfig, ConfigLoadError> {
        let config = PipelineConfig {
            ingest: self.ingest.to_ingest_config()?,
            segment: self.segment.to_segment_config(),
            chunk: self.chunk.to_chunk_config(),
        };
        config
            .validate()
            .map_err(|err| ConfigLoadError::Validation(err.to_string()))?;
        Ok(config)
    }
}

impl Default for PolicysegConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            ingest: IngestYamlConfig::default(),
            segment: SegmentYamlConfig::default(),
            chunk: ChunkYamlConfig::default(),
        }
    }
}

/// Ingest stage YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_policy_id_namespace")]
    pub policy_id_namespace: String,

    #[serde(default = "true_value")]
    pub strip_control_chars: bool,

    #[serde(default = "true_value")]
    pub normalize_line_endings: bool,

    #[serde(default = "true_value")]
    pub strip_bom: bool,

    /// Raw payload cap in bytes; omitted means unlimited.
    #[serde(default)]
    pub max_payload_bytes: Option<usize>,
}

impl IngestYamlConfig {
    fn to_ingest_config(&self) -> Result<IngestConfig, ConfigLoadError> {
        let namespace = Uuid::parse_str(&self.policy_id_namespace).map_err(|err| {
            ConfigLoadError::Validation(format!("ingest.policy_id_namespace: {err}"))
        })?;
        Ok(IngestConfig {
            version: self.version,
            policy_id_namespace: namespace,
            strip_control_chars: self.strip_control_chars,
            normalize_line_endings: self.normalize_line_endings,
            strip_bom: self.strip_bom,
            max_payload_bytes: self.max_payload_bytes,
        })
    }
}

impl Default for IngestYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            policy_id_namespace: default_policy_id_namespace(),
            strip_control_chars: true,
            normalize_line_endings: true,
            strip_bom: true,
            max_payload_bytes: None,
        }
    }
}

/// Segmentation stage YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentYamlConfig {
    #[serde(default = "default_title_case_ratio")]
    pub title_case_ratio: f64,

    #[serde(default = "default_max_heading_chars")]
    pub max_heading_chars: usize,

    #[serde(default = "default_heading_level")]
    pub heuristic_level: u8,

    #[serde(default = "default_heading_level")]
    pub toc_level: u8,

    #[serde(default = "default_toc_scan_lines")]
    pub toc_scan_lines: usize,

    #[serde(default = "default_toc_gap_limit")]
    pub toc_gap_limit: usize,
}

impl SegmentYamlConfig {
    fn to_segment_config(&self) -> SegmentConfig {
        SegmentConfig {
            title_case_ratio: self.title_case_ratio,
            max_heading_chars: self.max_heading_chars,
            heuristic_level: self.heuristic_level,
            toc_level: self.toc_level,
            toc_scan_lines: self.toc_scan_lines,
            toc_gap_limit: self.toc_gap_limit,
        }
    }
}

impl Default for SegmentYamlConfig {
    fn default() -> Self {
        Self {
            title_case_ratio: default_title_case_ratio(),
            max_heading_chars: default_max_heading_chars(),
            heuristic_level: default_heading_level(),
            toc_level: default_heading_level(),
            toc_scan_lines: default_toc_scan_lines(),
            toc_gap_limit: default_toc_gap_limit(),
        }
    }
}

/// Chunking stage YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkYamlConfig {
    #[serde(default = "default_max_chunk_bytes")]
    pub max_chunk_bytes: usize,

    #[serde(default = "default_overlap_bytes")]
    pub overlap_bytes: usize,

    #[serde(default = "default_boundary_lookback")]
    pub boundary_lookback: usize,
}

impl ChunkYamlConfig {
    fn to_chunk_config(&self) -> ChunkConfig {
        ChunkConfig {
            max_chunk_bytes: self.max_chunk_bytes,
            overlap_bytes: self.overlap_bytes,
            boundary_lookback: self.boundary_lookback,
        }
    }
}

impl Default for ChunkYamlConfig {
    fn default() -> Self {
        Self {
            max_chunk_bytes: default_max_chunk_bytes(),
            overlap_bytes: default_overlap_bytes(),
            boundary_lookback: default_boundary_lookback(),
        }
    }
}

fn default_version() -> u32 {
    1
}
fn default_policy_id_namespace() -> String {
    Uuid::NAMESPACE_URL.to_string()
}
fn true_value() -> bool {
    true
}
fn default_title_case_ratio() -> f64 {
    0.6
}
fn default_max_heading_chars() -> usize {
    90
}
fn default_heading_level() -> u8 {
    2
}
fn default_toc_scan_lines() -> usize {
    30
}
fn default_toc_gap_limit() -> usize {
    6
}
fn default_max_chunk_bytes() -> usize {
    1200
}
fn default_overlap_bytes() -> usize {
    200
}
fn default_boundary_lookback() -> usize {
    64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
segment:
  max_heading_chars: 60
chunk:
  max_chunk_bytes: 800
"#;

        let config = PolicysegConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.name, Some("test config".to_string()));
        assert_eq!(config.segment.max_heading_chars, 60);
        assert_eq!(config.segment.toc_gap_limit, 6);
        assert_eq!(config.chunk.max_chunk_bytes, 800);
        assert_eq!(config.chunk.overlap_bytes, 200);
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1.0"
ingest:
  version: 1
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = PolicysegConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.version, "1.0");
    }

    #[test]
    fn test_default_config() {
        let config = PolicysegConfig::default();
        assert_eq!(config.version, "1.0");
        assert!(config.name.is_none());

        let pipeline = config.pipeline_config().unwrap();
        assert_eq!(pipeline.segment, SegmentConfig::default());
        assert_eq!(pipeline.chunk, ChunkConfig::default());
        assert_eq!(pipeline.ingest.policy_id_namespace, Uuid::NAMESPACE_URL);
        assert_eq!(pipeline.ingest.max_payload_bytes, None);
    }

    #[test]
    fn omitted_sections_match_stage_defaults() {
        let config = PolicysegConfig::from_yaml("version: \"1.0\"\n").unwrap();
        let pipeline = config.pipeline_config().unwrap();
        assert_eq!(pipeline, PipelineConfig::default());
        assert_eq!(pipeline.ingest, IngestConfig::default());
    }

    #[test]
    fn test_unsupported_version() {
        let result = PolicysegConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(result, Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"));
    }

    #[test]
    fn test_chunk_validation() {
        let yaml = r#"
version: "1.0"
chunk:
  max_chunk_bytes: 100
  overlap_bytes: 100
"#;

        let result = PolicysegConfig::from_yaml(yaml);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("overlap_bytes"));
    }

    #[test]
    fn test_segment_validation() {
        let yaml = r#"
version: "1.0"
segment:
  heuristic_level: 9
"#;

        let result = PolicysegConfig::from_yaml(yaml);
        assert!(result.unwrap_err().to_string().contains("heuristic_level"));
    }

    #[test]
    fn test_bad_namespace() {
        let yaml = r#"
version: "1.0"
ingest:
  policy_id_namespace: "not-a-uuid"
"#;

        let result = PolicysegConfig::from_yaml(yaml);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("policy_id_namespace"));
    }

    #[test]
    fn test_full_yaml_roundtrip() {
        let yaml = r#"
version: "1.0"
name: "production"
ingest:
  version: 1
  policy_id_namespace: "6ba7b810-9dad-11d1-80b4-00c04fd430c8"
  strip_control_chars: true
  normalize_line_endings: true
  strip_bom: false
  max_payload_bytes: 1048576

segment:
  title_case_ratio: 0.75
  max_heading_chars: 80
  heuristic_level: 3
  toc_level: 2
  toc_scan_lines: 40
  toc_gap_limit: 4

chunk:
  max_chunk_bytes: 2000
  overlap_bytes: 250
  boundary_lookback: 32
"#;

        let config = PolicysegConfig::from_yaml(yaml).unwrap();
        let pipeline = config.pipeline_config().unwrap();

        assert_eq!(pipeline.ingest.policy_id_namespace, Uuid::NAMESPACE_DNS);
        assert!(!pipeline.ingest.strip_bom);
        assert_eq!(pipeline.segment.title_case_ratio, 0.75);
        assert_eq!(pipeline.segment.heuristic_level, 3);
        assert_eq!(pipeline.chunk.max_chunk_bytes, 2000);
        assert_eq!(pipeline.chunk.boundary_lookback, 32);

        let dumped = serde_yaml::to_string(&config).unwrap();
        let reparsed = PolicysegConfig::from_yaml(&dumped).unwrap();
        assert_eq!(reparsed.chunk.overlap_bytes, 250);
    }
}
