//! Workspace umbrella crate for policy segmentation.
//!
//! Stitches the three stages together so callers can go from a policy file
//! (or text already in memory) to its section tree and provenance-tagged
//! chunks with a single call:
//!
//! 1. **ingest** - load and clean the text, produce a [`PolicyDocument`]
//! 2. **segment** - infer the nested [`Section`] tree
//! 3. **chunk** - cut each section's own text into hashed [`PolicyChunk`]s
//!
//! ```rust
//! use policyseg::{process_document, PartyType, PipelineConfig, PolicyDocument};
//!
//! let doc = PolicyDocument::new("acme", PartyType::FirstParty, "# Intro\nHello\n## Details\nWorld\n");
//! let processed = process_document(&doc, &PipelineConfig::default()).unwrap();
//!
//! assert_eq!(processed.sections.len(), 2);
//! assert_eq!(processed.chunks.len(), 2);
//! assert_eq!(processed.chunks[1].section_path, "Intro > Details");
//! ```

pub mod config;

pub use chunk::{
    ChunkConfig, ChunkError, Chunker, PolicyChunk, PolicyChunks, chunk_policy, hash_text,
};
pub use config::{ConfigLoadError, PolicysegConfig};
pub use ingest::{
    ConfigError as IngestConfigError, ExtractError, FallbackExtractor, IngestConfig, IngestError,
    PartyType, PolicyDocument, SourceFormat, TextDumpExtractor, TextExtractor, extract_main_text,
    load_policy, load_policy_with_extractor, policy_from_text,
};
pub use segment::{
    HeadingClassifier, HeadingEvidence, HeadingRule, Section, SectionTreeBuilder, SegmentConfig,
    SegmentConfigError, build_section_tree, build_section_tree_with_config, normalize_title,
    section_bodies,
};

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};
use tracing::{Level, info, warn};

/// Errors that can occur while running a policy through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Ingest(IngestError),
    IngestConfig(IngestConfigError),
    SegmentConfig(SegmentConfigError),
    Chunk(ChunkError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Ingest(err) => write!(f, "ingest failure: {err}"),
            PipelineError::IngestConfig(err) => write!(f, "invalid ingest config: {err}"),
            PipelineError::SegmentConfig(err) => write!(f, "invalid segment config: {err}"),
            PipelineError::Chunk(err) => write!(f, "chunking failure: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Ingest(err) => Some(err),
            PipelineError::IngestConfig(err) => Some(err),
            PipelineError::SegmentConfig(err) => Some(err),
            PipelineError::Chunk(err) => Some(err),
        }
    }
}

impl From<IngestError> for PipelineError {
    fn from(value: IngestError) -> Self {
        PipelineError::Ingest(value)
    }
}

impl From<IngestConfigError> for PipelineError {
    fn from(value: IngestConfigError) -> Self {
        PipelineError::IngestConfig(value)
    }
}

impl From<SegmentConfigError> for PipelineError {
    fn from(value: SegmentConfigError) -> Self {
        PipelineError::SegmentConfig(value)
    }
}

impl From<ChunkError> for PipelineError {
    fn from(value: ChunkError) -> Self {
        PipelineError::Chunk(value)
    }
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_ingest(&self, latency: Duration, result: Result<(), IngestError>);
    fn record_segment(&self, latency: Duration, section_count: usize);
    fn record_chunk(&self, latency: Duration, result: Result<usize, PipelineError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_ingest(self, result: Result<(), IngestError>) {
        self.recorder.record_ingest(self.start.elapsed(), result);
    }

    fn record_segment(self, section_count: usize) {
        self.recorder
            .record_segment(self.start.elapsed(), section_count);
    }

    fn record_chunk(self, result: Result<usize, PipelineError>) {
        self.recorder.record_chunk(self.start.elapsed(), result);
    }
}

/// Configuration for every pipeline stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    pub ingest: IngestConfig,
    pub segment: SegmentConfig,
    pub chunk: ChunkConfig,
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.ingest.validate()?;
        self.segment.validate()?;
        self.chunk.validate()?;
        Ok(())
    }
}

/// Section tree and chunks of one policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedPolicy {
    pub policy_id: String,
    pub party_type: PartyType,
    pub sections: Vec<Section>,
    pub chunks: Vec<PolicyChunk>,
}

/// Segment and chunk a document that is already in memory.
pub fn process_document(
    document: &PolicyDocument,
    cfg: &PipelineConfig,
) -> Result<ProcessedPolicy, PipelineError> {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "policyseg.process_document",
        policy_id = %document.policy_id,
        party_type = %document.party_type
    );
    let _guard = span.enter();

    let builder = SectionTreeBuilder::new(cfg.segment.clone())?;
    let segment_metrics = MetricsSpan::start();
    let sections = builder.build(&document.raw_text);
    if let Some(metrics) = segment_metrics {
        metrics.record_segment(sections.len());
    }

    let chunk_metrics = MetricsSpan::start();
    let chunks = match Chunker::new(cfg.chunk)
        .and_then(|chunker| chunker.chunk_sections(document, sections.clone()))
    {
        Ok(chunks) => chunks.collect::<Vec<_>>(),
        Err(err) => {
            let err = PipelineError::Chunk(err);
            if let Some(metrics) = chunk_metrics {
                metrics.record_chunk(Err(err.clone()));
            }
            warn!(error = %err, "policy_failed");
            return Err(err);
        }
    };
    if let Some(metrics) = chunk_metrics {
        metrics.record_chunk(Ok(chunks.len()));
    }

    info!(
        text_len = document.len(),
        section_count = sections.len(),
        chunk_count = chunks.len(),
        elapsed_micros = start.elapsed().as_micros(),
        "policy_processed"
    );

    Ok(ProcessedPolicy {
        policy_id: document.policy_id.clone(),
        party_type: document.party_type,
        sections,
        chunks,
    })
}

/// Load a policy file through the ingest stage, recording ingest metrics.
pub fn load_document(
    path: impl AsRef<Path>,
    party_type: PartyType,
    cfg: &IngestConfig,
) -> Result<PolicyDocument, PipelineError> {
    cfg.validate()?;
    let ingest_metrics = MetricsSpan::start();
    match load_policy(path, party_type, cfg) {
        Ok(document) => {
            if let Some(metrics) = ingest_metrics {
                metrics.record_ingest(Ok(()));
            }
            Ok(document)
        }
        Err(err) => {
            if let Some(metrics) = ingest_metrics {
                metrics.record_ingest(Err(err.clone()));
            }
            Err(PipelineError::Ingest(err))
        }
    }
}

/// Load, segment, and chunk a policy file.
pub fn process_policy_file(
    path: impl AsRef<Path>,
    party_type: PartyType,
    cfg: &PipelineConfig,
) -> Result<ProcessedPolicy, PipelineError> {
    let document = load_document(path, party_type, &cfg.ingest)?;
    process_document(&document, cfg)
}

/// Ingest in-memory text, then segment and chunk it.
pub fn process_text(
    policy_id: impl Into<String>,
    party_type: PartyType,
    text: &str,
    cfg: &PipelineConfig,
) -> Result<ProcessedPolicy, PipelineError> {
    cfg.ingest.validate()?;
    let ingest_metrics = MetricsSpan::start();
    let document = match policy_from_text(policy_id, party_type, text, &cfg.ingest) {
        Ok(document) => {
            if let Some(metrics) = ingest_metrics {
                metrics.record_ingest(Ok(()));
            }
            document
        }
        Err(err) => {
            if let Some(metrics) = ingest_metrics {
                metrics.record_ingest(Err(err.clone()));
            }
            return Err(PipelineError::Ingest(err));
        }
    };
    process_document(&document, cfg)
}

/// Process many documents in parallel, one independent pipeline each.
///
/// Results are returned in input order.
#[cfg(feature = "parallel")]
pub fn process_batch(
    documents: &[PolicyDocument],
    cfg: &PipelineConfig,
) -> Vec<Result<ProcessedPolicy, PipelineError>> {
    use rayon::prelude::*;

    documents
        .par_iter()
        .map(|document| process_document(document, cfg))
        .collect()
}
