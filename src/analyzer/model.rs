// src/analyzer/model.rs
// =============================================================================
// Records produced by the extractor.
//
// LinkRecord and ImageRecord carry an optional status: extraction leaves it
// empty, the checker fills it in afterwards (by index, see checker/classify.rs).
// =============================================================================

use crate::checker::LinkStatus;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Which markdown syntax produced a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// `[text](url)`
    Standard,
    /// `[[Page Name]]`
    Wiki,
    /// `[text][ref]`
    Reference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRecord {
    pub text: String,
    pub url: String,
    pub kind: LinkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LinkStatus>,
}

impl LinkRecord {
    pub fn new(text: impl Into<String>, url: impl Into<String>, kind: LinkKind) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
            kind,
            status: None,
        }
    }

    pub fn is_broken(&self) -> bool {
        self.status.as_ref().is_some_and(LinkStatus::is_broken)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    /// May be empty: `![](logo.png)` is still an image.
    pub alt: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LinkStatus>,
}

impl ImageRecord {
    pub fn new(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            alt: alt.into(),
            url: url.into(),
            status: None,
        }
    }

    pub fn is_broken(&self) -> bool {
        self.status.as_ref().is_some_and(LinkStatus::is_broken)
    }
}

/// Count of headings per level.
///
/// A fixed array, so every level 1..=6 is always present (zero if unseen).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadingHistogram([usize; 6]);

impl HeadingHistogram {
    pub const LEVELS: std::ops::RangeInclusive<u8> = 1..=6;

    /// Count for a level; 0 for anything outside 1..=6.
    pub fn get(&self, level: u8) -> usize {
        match level {
            1..=6 => self.0[usize::from(level - 1)],
            _ => 0,
        }
    }

    /// Levels above 6 are folded into h6.
    pub fn record(&mut self, level: u8) {
        let slot = usize::from(level.clamp(1, 6) - 1);
        self.0[slot] += 1;
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// (level, count) pairs in level order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        Self::LEVELS.map(move |level| (level, self.get(level)))
    }
}

// Serialized as {"h1": n, ..., "h6": n} so JSON consumers get named keys
impl Serialize for HeadingHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6))?;
        for (level, count) in self.iter() {
            map.serialize_entry(&format!("h{}", level), &count)?;
        }
        map.end()
    }
}
