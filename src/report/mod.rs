// src/report/mod.rs
// =============================================================================
// Aggregation and presentation.
//
// - summary: builds the AnalysisSummary (runs the whole analysis)
// - console: renders it for a terminal
//
// The summary derives serde::Serialize, which is all the JSON output needs.
// =============================================================================

mod console;
mod summary;

pub use console::render;
pub use summary::{build_summary, build_summary_with, AnalysisSummary};
