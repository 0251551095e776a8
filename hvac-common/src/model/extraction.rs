// hvac-common/src/model/extraction.rs
use std::fmt;

/// A bounded excerpt of the page starting where a label was found.
///
/// Only meant for display. `excerpt` is always a prefix of the body text at
/// `offset` and never longer than the cap it was cut with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub label: String,
    /// Byte offset of the label in the body text.
    pub offset: usize,
    pub excerpt: String,
}

impl fmt::Display for FieldMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.excerpt)
    }
}

/// Outcome of looking for both labels in one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found {
        temp: FieldMatch,
        humidity: FieldMatch,
    },
    /// At least one label was missing. Expected whenever the page layout drifts.
    NotFound,
}
