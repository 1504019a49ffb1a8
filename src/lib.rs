// src/lib.rs
// =============================================================================
// md-lens library root.
//
// The analysis core lives here so the CLI (src/main.rs) and any other
// front-end can share it:
// - analyzer: word counting and structural extraction (pure, no I/O)
// - checker:  link classification and reachability probes (async, network)
// - report:   the AnalysisSummary and its console rendering
// - config:   validated configuration
// - document: loading markdown text
// - github:   fetching markdown files from a GitHub repository
// =============================================================================

pub mod analyzer;
pub mod checker;
pub mod config;
pub mod document;
pub mod error;
pub mod github;
pub mod report;

pub use analyzer::{
    count_headings, count_words, extract_images, extract_links, HeadingHistogram, ImageRecord,
    LinkKind, LinkRecord,
};
pub use checker::{validate_images, validate_links, Failure, HttpProber, LinkStatus, Probe, SkipReason};
pub use config::Config;
pub use document::Document;
pub use error::{AnalyzeError, ConfigError, DocumentError};
pub use report::{build_summary, build_summary_with, AnalysisSummary};
