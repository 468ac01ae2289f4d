//! Line markers
//!
//! A `MarkerSet` holds the literal prefixes used to classify a YAML line. Matching is a
//! plain `starts_with`; no marker is ever treated as a pattern.

use super::error::MarkerError;
use serde::Serialize;

pub const DEFAULT_DOC_DELIMITER: &str = "###";
pub const DEFAULT_DOC_PARAMETER: &str = "##";
pub const DEFAULT_COMMENT: &str = "#";

/// The three documentation prefixes.
///
/// With the defaults, `###` opens a documentation block, `#` continues it and `##`
/// documents an individual key. Because the defaults share a common prefix, the
/// extractor checks them from the most specific rule down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerSet {
    doc_delimiter: String,
    doc_parameter: String,
    comment: String,
}

impl MarkerSet {
    /// Build a marker set, rejecting empty prefixes.
    pub fn new(
        doc_delimiter: impl Into<String>,
        doc_parameter: impl Into<String>,
        comment: impl Into<String>,
    ) -> Result<Self, MarkerError> {
        let markers = MarkerSet {
            doc_delimiter: doc_delimiter.into(),
            doc_parameter: doc_parameter.into(),
            comment: comment.into(),
        };
        markers.validate()?;
        Ok(markers)
    }

    fn validate(&self) -> Result<(), MarkerError> {
        let fields = [
            ("doc_delimiter", &self.doc_delimiter),
            ("doc_parameter", &self.doc_parameter),
            ("comment", &self.comment),
        ];
        match fields.iter().find(|(_, value)| value.is_empty()) {
            Some((name, _)) => Err(MarkerError::Empty { name: *name }),
            None => Ok(()),
        }
    }

    pub fn doc_delimiter(&self) -> &str {
        &self.doc_delimiter
    }

    pub fn doc_parameter(&self) -> &str {
        &self.doc_parameter
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        MarkerSet {
            doc_delimiter: DEFAULT_DOC_DELIMITER.to_string(),
            doc_parameter: DEFAULT_DOC_PARAMETER.to_string(),
            comment: DEFAULT_COMMENT.to_string(),
        }
    }
}
