// src/checker/status.rs
// =============================================================================
// The outcome of classifying one link (or image) URL.
//
//   Skipped      - never probed (anchor, reference, wiki, relative, excluded)
//   Reachable    - HTTP status below 400
//   Unreachable  - HTTP 400+, timeout, or a transport error
//
// Only Unreachable counts as broken.
// =============================================================================

use serde::Serialize;
use std::fmt;

/// Why a URL was not probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// `#section` - a fragment in the same document
    Anchor,
    /// `[text][ref]` - the reference key is not resolved
    Reference,
    /// `[[Page]]` - wiki pages have no URL
    Wiki,
    /// relative or local path, or a non-HTTP scheme
    NotHttp,
    /// path ends with an extension from `exclude_extensions`
    ExcludedExtension,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::Anchor => "anchor",
            SkipReason::Reference => "reference",
            SkipReason::Wiki => "wiki",
            SkipReason::NotHttp => "local",
            SkipReason::ExcludedExtension => "excluded",
        };
        f.write_str(reason)
    }
}

/// Why a probed URL is broken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Failure {
    /// The server answered with 400 or above
    Status { code: u16 },
    /// No answer within the per-link deadline
    Timeout,
    /// Any other transport/protocol error, by kind name (e.g. "DnsError")
    Error { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkStatus {
    Skipped { reason: SkipReason },
    Reachable { code: u16 },
    Unreachable { failure: Failure },
}

impl LinkStatus {
    pub fn skipped(reason: SkipReason) -> Self {
        LinkStatus::Skipped { reason }
    }

    /// Maps a raw probe outcome onto a status: below 400 is reachable.
    pub fn from_probe(outcome: Result<u16, ProbeError>) -> Self {
        match outcome {
            Ok(code) if code < 400 => LinkStatus::Reachable { code },
            Ok(code) => LinkStatus::Unreachable {
                failure: Failure::Status { code },
            },
            Err(ProbeError::Timeout) => LinkStatus::Unreachable {
                failure: Failure::Timeout,
            },
            Err(ProbeError::Transport(name)) => LinkStatus::Unreachable {
                failure: Failure::Error { name },
            },
        }
    }

    pub fn is_broken(&self) -> bool {
        matches!(self, LinkStatus::Unreachable { .. })
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Skipped { reason } => write!(f, "Skipped ({})", reason),
            LinkStatus::Reachable { code } => write!(f, "OK ({})", code),
            LinkStatus::Unreachable { failure } => match failure {
                Failure::Status { code } => write!(f, "Broken ({})", code),
                Failure::Timeout => f.write_str("Broken (Timeout)"),
                Failure::Error { name } => write!(f, "Broken ({})", name),
            },
        }
    }
}

/// What a Probe reports when it gets no HTTP status back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    Timeout,
    /// Transport failure, carrying the error kind name
    Transport(String),
}
