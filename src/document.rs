// src/document.rs
// =============================================================================
// A Document is the raw text of one markdown source plus a name used for
// reporting. The analysis core never reads files itself; it is handed a
// Document built here (from a local file) or in github/ (from a download).
// =============================================================================

use crate::error::DocumentError;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Builds a Document from raw bytes.
    ///
    /// Invalid UTF-8 is decoded lossily (best-effort text). Content with NUL
    /// bytes is binary, not markdown, and is rejected.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self, DocumentError> {
        let name = name.into();

        if bytes.contains(&0) {
            return Err(DocumentError::NotText { name });
        }

        let text = String::from_utf8_lossy(bytes).into_owned();
        Ok(Self { name, text })
    }

    /// Reads a local markdown file.
    pub fn read(path: &Path) -> Result<Self, DocumentError> {
        if !is_markdown_file(path) {
            return Err(DocumentError::NotMarkdown {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_bytes(path.display().to_string(), &bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when there is nothing but whitespace to analyze.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// `.md` / `.markdown`, case-insensitive.
pub fn is_markdown_file(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}
