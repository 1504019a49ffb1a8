// src/analyzer/mod.rs
// =============================================================================
// The pure half of the analysis: everything that only looks at the text.
//
// Submodules:
// - normalize: word counting (strips code, links, markdown symbols)
// - extract:   headings, links and images
// - model:     the records those produce
//
// Nothing in here does I/O or keeps state between calls, so it is safe to
// analyze any number of documents from any number of threads.
// =============================================================================

mod extract;
mod model;
mod normalize;

pub use extract::{count_headings, extract_images, extract_links, REFERENCE_PREFIX};
pub use model::{HeadingHistogram, ImageRecord, LinkKind, LinkRecord};
pub use normalize::count_words;
