// src/analyzer/extract.rs
// =============================================================================
// Structural extraction: headings, links and images.
//
// Everything here is a pattern scan over the raw text. There is no block
// parser, so syntax inside code blocks is picked up like anything else.
//
// Links come from three independent passes whose results are concatenated:
//   1. standard  [text](url)
//   2. wiki      [[Page Name]]
//   3. reference [text][ref]   -> url stored as "ref:<ref>"
// so the output is grouped by kind, each group in document order.
//
// None of these functions can fail: malformed input just yields fewer
// matches.
// =============================================================================

use super::model::{HeadingHistogram, ImageRecord, LinkKind, LinkRecord};
use regex::Regex;
use std::sync::LazyLock;

/// Prefix for reference-style link targets. Reference keys are not resolved
/// to real URLs; the checker recognises this prefix and skips them.
pub const REFERENCE_PREFIX: &str = "ref:";

static RE_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^(#{1,6})\s+").unwrap());
static RE_STANDARD_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static RE_WIKI_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());
static RE_REFERENCE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\[([^\]]+)\]").unwrap());
static RE_IMAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());

/// Counts line-anchored ATX headings (`# ` through `###### `).
pub fn count_headings(text: &str) -> HeadingHistogram {
    let mut histogram = HeadingHistogram::default();

    for caps in RE_HEADING.captures_iter(text) {
        // The pattern only admits 1..=6 hashes
        let level = caps[1].len() as u8;
        histogram.record(level);
    }

    histogram
}

/// Extracts standard, wiki and reference links, grouped in that order.
///
/// Extraction does not filter by scheme: `[Readme](README.md)` is a link
/// with url `README.md`. Deciding what to probe is the checker's job.
pub fn extract_links(text: &str) -> Vec<LinkRecord> {
    let mut links = Vec::new();

    let mut start = 0;
    while let Some(caps) = RE_STANDARD_LINK.captures_at(text, start) {
        let Some(whole) = caps.get(0) else { break };

        // `![alt](url)` is an image, not a link; but a link can still begin
        // inside its alt text, so resume right after the `[`
        if text[..whole.start()].ends_with('!') {
            start = whole.start() + 1;
            continue;
        }

        links.push(LinkRecord::new(&caps[1], &caps[2], LinkKind::Standard));
        start = whole.end();
    }

    for caps in RE_WIKI_LINK.captures_iter(text) {
        links.push(LinkRecord::new(&caps[1], &caps[1], LinkKind::Wiki));
    }

    for caps in RE_REFERENCE_LINK.captures_iter(text) {
        let url = format!("{}{}", REFERENCE_PREFIX, &caps[2]);
        links.push(LinkRecord::new(&caps[1], url, LinkKind::Reference));
    }

    links
}

/// Extracts `![alt](url)` images in document order. Alt text may be empty.
pub fn extract_images(text: &str) -> Vec<ImageRecord> {
    RE_IMAGE
        .captures_iter(text)
        .map(|caps| ImageRecord::new(&caps[1], &caps[2]))
        .collect()
}
