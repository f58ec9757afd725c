//! HTML-to-text extraction boundary.
//!
//! Boilerplate removal is owned by an external extraction engine; this module
//! only fixes the seam it plugs into. A [`TextExtractor`] turns HTML into
//! text, [`FallbackExtractor`] chains a preferred strategy with a simpler one,
//! and [`TextDumpExtractor`] is that simpler one: every visible text node,
//! one per line.
//!
//! Primary strategies should emit markdown-style text when they can. `#`
//! headings and `-` bullets survive extraction and are exactly the cues the
//! section classifier reads.
//!
//! ```rust
//! use ingest::{extract_main_text, TextDumpExtractor};
//!
//! let html = "<html><body><h1>Privacy</h1><p>We collect data.</p></body></html>";
//! let text = extract_main_text(Some(html), None, &TextDumpExtractor).unwrap();
//! assert_eq!(text, "Privacy\nWe collect data.");
//! ```
use scraper::Html;
use tracing::{debug, warn};

use crate::error::ExtractError;

/// A strategy that converts an HTML document into plain or markdown text.
///
/// `Ok(None)` means "nothing worth keeping"; `Err` means the strategy itself
/// broke. [`FallbackExtractor`] treats both as a reason to try the next
/// strategy, but only logs the latter as a warning.
pub trait TextExtractor: Send + Sync {
    /// Short strategy name used in logs and errors.
    fn name(&self) -> &'static str;

    fn extract(&self, html: &str, source_url: Option<&str>)
        -> Result<Option<String>, ExtractError>;
}

impl<T: TextExtractor + ?Sized> TextExtractor for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn extract(
        &self,
        html: &str,
        source_url: Option<&str>,
    ) -> Result<Option<String>, ExtractError> {
        (**self).extract(html, source_url)
    }
}

/// Whole-document text dump.
///
/// Collects every text node outside `script`, `style`, `noscript`, and
/// `template`, trims each line, and drops blank lines. No boilerplate
/// detection and no markup recovery.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDumpExtractor;

const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

impl TextExtractor for TextDumpExtractor {
    fn name(&self) -> &'static str {
        "text-dump"
    }

    fn extract(
        &self,
        html: &str,
        _source_url: Option<&str>,
    ) -> Result<Option<String>, ExtractError> {
        let document = Html::parse_document(html);
        let mut lines: Vec<&str> = Vec::new();

        for node in document.tree.root().descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
            });
            if hidden {
                continue;
            }
            lines.extend(text.lines().map(str::trim).filter(|l| !l.is_empty()));
        }

        if lines.is_empty() {
            return Ok(None);
        }
        Ok(Some(lines.join("\n")))
    }
}

/// Tries `primary`, then `fallback`.
///
/// The fallback runs when the primary errors, returns `None`, or returns
/// only whitespace.
pub struct FallbackExtractor<P, F> {
    primary: P,
    fallback: F,
}

impl<P: TextExtractor, F: TextExtractor> FallbackExtractor<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: TextExtractor, F: TextExtractor> TextExtractor for FallbackExtractor<P, F> {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn extract(
        &self,
        html: &str,
        source_url: Option<&str>,
    ) -> Result<Option<String>, ExtractError> {
        match self.primary.extract(html, source_url) {
            Ok(Some(text)) if !text.trim().is_empty() => return Ok(Some(text)),
            Ok(_) => {
                debug!(
                    strategy = self.primary.name(),
                    fallback = self.fallback.name(),
                    "extractor_empty"
                );
            }
            Err(err) => {
                warn!(
                    strategy = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %err,
                    "extractor_failed"
                );
            }
        }
        self.fallback.extract(html, source_url)
    }
}

/// Extracts the main text of an HTML document.
///
/// Returns `None` for absent or blank HTML, and when the extractor yields
/// nothing. A strategy error is logged and mapped to `None`; wrap the
/// extractor in a [`FallbackExtractor`] to recover instead.
pub fn extract_main_text(
    html: Option<&str>,
    source_url: Option<&str>,
    extractor: &dyn TextExtractor,
) -> Option<String> {
    let html = html.filter(|h| !h.trim().is_empty())?;
    match extractor.extract(html, source_url) {
        Ok(Some(text)) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Ok(None) => None,
        Err(err) => {
            warn!(strategy = extractor.name(), error = %err, "extractor_failed");
            None
        }
    }
}
