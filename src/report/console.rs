// src/report/console.rs
// =============================================================================
// Human-readable rendering of an AnalysisSummary.
//
// Everything is built into a String first so the output can be tested; the
// binary just prints it. JSON output goes through serde instead (see main.rs).
// =============================================================================

use super::summary::AnalysisSummary;
use std::fmt::{self, Write};

const RULE_WIDTH: usize = 60;

/// Renders the report printed by `md-lens file` / `md-lens github`.
pub fn render(summary: &AnalysisSummary) -> String {
    let mut out = String::new();
    // Writing into a String never fails
    let _ = write_report(&mut out, summary);
    out
}

/// Writes the console report for `summary` into any `fmt::Write` sink.
pub fn write_report(out: &mut impl Write, summary: &AnalysisSummary) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "{}", rule)?;
    writeln!(out, "MARKDOWN ANALYSIS REPORT: {}", summary.source)?;
    writeln!(out, "{}", rule)?;
    writeln!(out)?;

    writeln!(out, "📊 Words: {}", summary.word_count)?;
    writeln!(out)?;

    writeln!(out, "📑 Headings: {}", summary.headings.total())?;
    for (level, count) in summary.headings.iter().filter(|(_, count)| *count > 0) {
        writeln!(out, "   H{}: {}", level, count)?;
    }
    writeln!(out)?;

    writeln!(out, "🔗 Links: {}", summary.links.len())?;
    writeln!(out, "   Broken: {}", summary.broken_links.len())?;
    if !summary.broken_links.is_empty() {
        writeln!(out, "   Broken URLs:")?;
        for link in &summary.broken_links {
            let status = link.status.as_ref().map(ToString::to_string).unwrap_or_default();
            writeln!(out, "      - {} ({})", link.url, status)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "🖼️  Images: {}", summary.images.len())?;
    for image in &summary.images {
        let alt = if image.alt.is_empty() {
            "(no alt text)"
        } else {
            image.alt.as_str()
        };
        match &image.status {
            Some(status) if status.is_broken() => {
                writeln!(out, "   - {}: {} ({})", alt, image.url, status)?;
            }
            _ => {
                writeln!(out, "   - {}: {}", alt, image.url)?;
            }
        }
    }
    writeln!(out)?;

    if summary.cancelled {
        let unchecked = summary.links.iter().filter(|l| l.status.is_none()).count();
        writeln!(out, "⚠️  Link checking was interrupted, {} link(s) not checked", unchecked)?;
        writeln!(out)?;
    }

    writeln!(out, "{}", rule)
}
