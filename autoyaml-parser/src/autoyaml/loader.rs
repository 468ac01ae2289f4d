//! Source loading
//!
//! `SourceLoader` reads a YAML file from disk and runs the comment extractor over it.
//! The file is read in one call and released before the scan starts.

use super::error::ExtractError;
use super::extraction::{CommentExtractor, ResultBuffer};
use super::markers::MarkerSet;
use std::fs;
use std::path::Path;

/// Reads YAML files and extracts their documentation.
#[derive(Debug, Clone, Default)]
pub struct SourceLoader {
    markers: MarkerSet,
}

impl SourceLoader {
    pub fn new(markers: MarkerSet) -> Self {
        Self { markers }
    }

    /// Extract the documentation of the file at `path`.
    ///
    /// Fails with [`ExtractError::NotAFile`] when `path` is missing or is not a regular
    /// file, and with [`ExtractError::Io`] when it cannot be read as UTF-8 text.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<ResultBuffer, ExtractError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ExtractError::NotAFile {
                location: path.to_path_buf(),
            });
        }
        tracing::debug!(location = %path.display(), "parsing file");
        let source = fs::read_to_string(path).map_err(|source| ExtractError::Io {
            location: path.to_path_buf(),
            source,
        })?;
        Ok(self.extract_str(&source, path))
    }

    /// Extract from text already in memory, attributing lines to `path`.
    pub fn extract_str(&self, source: &str, path: impl AsRef<Path>) -> ResultBuffer {
        CommentExtractor::new(&self.markers).extract_str(source, path)
    }
}

/// Extract the documentation of `path` using `markers`.
pub fn extract(path: impl AsRef<Path>, markers: &MarkerSet) -> Result<ResultBuffer, ExtractError> {
    SourceLoader::new(markers.clone()).load(path)
}
