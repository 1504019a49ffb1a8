// src/report/summary.rs
// =============================================================================
// The Report Aggregator.
//
// build_summary runs one full analysis pass over a Document:
//   text -> word count + headings + links + images   (pure)
//        -> link classification                       (network)
//        -> image classification, if enabled         (network)
//        -> AnalysisSummary
//
// A failing probe only ever affects its own record. Counts and every other
// link's status are always kept, even when the pass is cancelled.
// =============================================================================

use crate::analyzer::{
    count_headings, count_words, extract_images, extract_links, HeadingHistogram, ImageRecord,
    LinkRecord,
};
use crate::checker::{validate_images_until, validate_links_until, HttpProber, Probe};
use crate::config::Config;
use crate::document::Document;
use crate::error::AnalyzeError;
use futures::FutureExt;
use serde::Serialize;
use std::future::Future;

/// Everything a presentation layer needs, already derived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    /// Name of the analyzed document (file path or repository file name)
    pub source: String,
    pub word_count: usize,
    pub headings: HeadingHistogram,
    /// Every extracted link, in extraction order, each with its status
    pub links: Vec<LinkRecord>,
    pub images: Vec<ImageRecord>,
    /// Links classified Unreachable
    pub broken_links: Vec<LinkRecord>,
    /// Images classified Unreachable (empty unless `validate_images`)
    pub broken_images: Vec<ImageRecord>,
    /// Classification was aborted; some records may have no status
    pub cancelled: bool,
}

impl AnalysisSummary {
    pub fn has_broken(&self) -> bool {
        !self.broken_links.is_empty() || !self.broken_images.is_empty()
    }
}

/// Analyzes a document, probing links over HTTP.
pub async fn build_summary(document: &Document, config: &Config) -> Result<AnalysisSummary, AnalyzeError> {
    let prober = HttpProber::new(config)?;
    Ok(build_summary_with(document, config, &prober, std::future::pending()).await)
}

/// Analyzes a document with an explicit prober and cancellation signal.
///
/// When `cancel` completes, probes still in flight are dropped and the
/// summary comes back with `cancelled` set.
pub async fn build_summary_with<P, C>(
    document: &Document,
    config: &Config,
    prober: &P,
    cancel: C,
) -> AnalysisSummary
where
    P: Probe,
    C: Future<Output = ()>,
{
    let text = document.text();

    let word_count = count_words(text);
    let headings = count_headings(text);
    let mut links = extract_links(text);
    let mut images = extract_images(text);

    tracing::debug!(
        source = document.name(),
        word_count,
        links = links.len(),
        images = images.len(),
        "extracted structure"
    );

    // Both classification passes listen to the same signal
    let cancel = cancel.shared();

    let links_pass = validate_links_until(&mut links, config, prober, cancel.clone()).await;
    let mut cancelled = links_pass.cancelled;

    let mut broken_images = Vec::new();
    if config.validate_images && !cancelled {
        let images_pass = validate_images_until(&mut images, config, prober, cancel).await;
        broken_images = images_pass.broken;
        cancelled = images_pass.cancelled;
    }

    AnalysisSummary {
        source: document.name().to_string(),
        word_count,
        headings,
        links,
        images,
        broken_links: links_pass.broken,
        broken_images,
        cancelled,
    }
}
