// hvac-core/src/extract.rs
//! Locates the temperature and humidity labels in a fetched status page.
//!
//! The page is treated as plain text. Labels are found with a literal,
//! case-sensitive search and only the text right after them is kept, as a
//! bounded excerpt for display. Nothing here interprets the numbers.

use hvac_common::config::{Config, DEFAULT_EXCERPT_CHARS};
use hvac_common::model::{Extraction, FieldMatch};
use tracing::debug;

pub const TEMP_LABEL: &str = "temp";
pub const HUMIDITY_LABEL: &str = "rh";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extractor {
    temp_label: String,
    humidity_label: String,
    excerpt_chars: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(TEMP_LABEL, HUMIDITY_LABEL, DEFAULT_EXCERPT_CHARS)
    }
}

impl Extractor {
    pub fn new(
        temp_label: impl Into<String>,
        humidity_label: impl Into<String>,
        excerpt_chars: usize,
    ) -> Self {
        Self {
            temp_label: temp_label.into(),
            humidity_label: humidity_label.into(),
            excerpt_chars,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(TEMP_LABEL, HUMIDITY_LABEL, config.excerpt_chars)
    }

    /// Finds the first occurrence of each label, each search starting from
    /// the top of `body`. Both must be present for `Found`.
    pub fn extract(&self, body: &str) -> Extraction {
        let temp = self.locate(body, &self.temp_label);
        let humidity = self.locate(body, &self.humidity_label);
        match (temp, humidity) {
            (Some(temp), Some(humidity)) => {
                debug!(
                    "Found '{}' at {} and '{}' at {}",
                    temp.label, temp.offset, humidity.label, humidity.offset
                );
                Extraction::Found { temp, humidity }
            }
            (temp, humidity) => {
                debug!(
                    "Labels missing from {} byte page (temp: {}, humidity: {})",
                    body.len(),
                    temp.is_some(),
                    humidity.is_some()
                );
                Extraction::NotFound
            }
        }
    }

    fn locate(&self, body: &str, label: &str) -> Option<FieldMatch> {
        let offset = body.find(label)?;
        Some(FieldMatch {
            label: label.to_string(),
            offset,
            excerpt: truncate_chars(&body[offset..], self.excerpt_chars).to_string(),
        })
    }
}

/// Returns at most `max_chars` characters from the start of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
