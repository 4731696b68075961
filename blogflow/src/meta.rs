//! Marker-line micro-format of the optimize stage.
//!
//! The optimize stage is asked to answer with:
//!
//! ```text
//! META TITLE: <title>
//! META DESCRIPTION: <description>
//!
//! OPTIMIZED CONTENT:
//! <body>
//! ```
//!
//! Extraction never fails. A line must *start* with a prefix to count, the
//! last matching line wins, and a missing marker yields an empty field.

use serde::{Deserialize, Serialize};

/// Prefix of the title marker line.
pub const META_TITLE_PREFIX: &str = "META TITLE:";
/// Prefix of the description marker line.
pub const META_DESCRIPTION_PREFIX: &str = "META DESCRIPTION:";
/// Marker introducing the rewritten body.
pub const OPTIMIZED_CONTENT_MARKER: &str = "OPTIMIZED CONTENT:";

/// Title and description recovered from optimize output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedMeta {
    /// Intended to stay under 60 characters; not enforced.
    pub title: String,
    /// Intended to stay under 160 characters; not enforced.
    pub description: String,
}

impl ExtractedMeta {
    /// Returns true if the title marker was missing or blank.
    #[must_use]
    pub fn missing_title(&self) -> bool {
        self.title.is_empty()
    }

    /// Returns true if the description marker was missing or blank.
    #[must_use]
    pub fn missing_description(&self) -> bool {
        self.description.is_empty()
    }

    /// Consumes into a `(title, description)` pair.
    #[must_use]
    pub fn into_pair(self) -> (String, String) {
        (self.title, self.description)
    }
}

/// Parser for the marker lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaExtractor;

impl MetaExtractor {
    /// Scans every line of `text` for the two marker prefixes.
    ///
    /// ```
    /// use blogflow::meta::MetaExtractor;
    ///
    /// let meta = MetaExtractor::extract("META TITLE:  Dog Beaches \nbody");
    /// assert_eq!(meta.title, "Dog Beaches");
    /// assert_eq!(meta.description, "");
    /// ```
    #[must_use]
    pub fn extract(text: &str) -> ExtractedMeta {
        let mut meta = ExtractedMeta::default();
        for line in text.lines() {
            if let Some(rest) = line.strip_prefix(META_TITLE_PREFIX) {
                meta.title = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix(META_DESCRIPTION_PREFIX) {
                meta.description = rest.trim().to_string();
            }
        }
        meta
    }

    /// Returns everything after the first `OPTIMIZED CONTENT:` marker.
    ///
    /// Falls back to the whole text when the marker is absent, so degraded
    /// or non-conforming optimize output still reaches the edit stage.
    #[must_use]
    pub fn optimized_body(text: &str) -> &str {
        text.find(OPTIMIZED_CONTENT_MARKER)
            .map_or(text, |idx| {
                text[idx + OPTIMIZED_CONTENT_MARKER.len()..].trim()
            })
    }

    /// Returns true if the text contains the body marker.
    #[must_use]
    pub fn has_body_marker(text: &str) -> bool {
        text.contains(OPTIMIZED_CONTENT_MARKER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "META TITLE: Best Dog Beaches\nMETA DESCRIPTION: Top beaches for pets\nOPTIMIZED CONTENT:\nBODY_X";

    #[test]
    fn test_extract_sample() {
        let meta = MetaExtractor::extract(SAMPLE);
        assert_eq!(meta.title, "Best Dog Beaches");
        assert_eq!(meta.description, "Top beaches for pets");
    }

    #[test]
    fn test_last_marker_wins() {
        let text = "META TITLE: First\nintro\nMETA TITLE: Second\n";
        assert_eq!(MetaExtractor::extract(text).title, "Second");
    }

    #[test]
    fn test_missing_markers_yield_empty_fields() {
        let meta = MetaExtractor::extract("just a body\nwith lines");
        assert_eq!(meta.into_pair(), (String::new(), String::new()));
    }

    #[test]
    fn test_indented_marker_is_ignored() {
        let meta = MetaExtractor::extract("  META TITLE: indented\n");
        assert!(meta.missing_title());
    }

    #[test]
    fn test_non_marker_line_order_is_irrelevant() {
        let a = "alpha\nMETA TITLE: T\nbeta\nMETA DESCRIPTION: D\ngamma";
        let b = "gamma\nbeta\nMETA TITLE: T\nMETA DESCRIPTION: D\nalpha";
        assert_eq!(MetaExtractor::extract(a), MetaExtractor::extract(b));
    }

    #[test]
    fn test_crlf_lines() {
        let meta = MetaExtractor::extract("META TITLE: T\r\nMETA DESCRIPTION: D\r\n");
        assert_eq!(meta.title, "T");
        assert_eq!(meta.description, "D");
    }

    #[test]
    fn test_optimized_body() {
        assert_eq!(MetaExtractor::optimized_body(SAMPLE), "BODY_X");
        assert!(MetaExtractor::has_body_marker(SAMPLE));
    }

    #[test]
    fn test_optimized_body_without_marker() {
        let text = "Error optimizing for SEO: quota";
        assert_eq!(MetaExtractor::optimized_body(text), text);
        assert!(!MetaExtractor::has_body_marker(text));
    }
}
