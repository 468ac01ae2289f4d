//! Error types for extraction, directive expansion and output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or reading a YAML file.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The resolved location does not reference a regular file.
    #[error("location \"{}\" is not a file.", location.display())]
    NotAFile { location: PathBuf },

    /// The file exists but could not be read as text.
    #[error("failed to read \"{}\": {source}", location.display())]
    Io {
        location: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    /// The path the failed operation was attempted on.
    pub fn location(&self) -> &std::path::Path {
        match self {
            ExtractError::NotAFile { location } | ExtractError::Io { location, .. } => location,
        }
    }
}

/// Invalid marker configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkerError {
    #[error("marker `{name}` must not be empty")]
    Empty { name: &'static str },
}

/// Errors raised while expanding `autoyaml` directives in a document.
///
/// Every variant names the document and the 1-based line of the directive, so the
/// message points the writer at the offending directive.
#[derive(Error, Debug)]
pub enum DirectiveError {
    #[error("{}:{line}: location \"{}\" is not a file.", document.display(), location.display())]
    NotAFile {
        document: PathBuf,
        line: usize,
        location: PathBuf,
    },

    #[error("{}:{line}: autoyaml directive requires one argument", document.display())]
    MissingArgument { document: PathBuf, line: usize },

    #[error("{}:{line}: autoyaml directive takes exactly one argument", document.display())]
    TooManyArguments { document: PathBuf, line: usize },

    #[error("{}:{line}: {source}", document.display())]
    Extract {
        document: PathBuf,
        line: usize,
        #[source]
        source: ExtractError,
    },
}

/// Errors raised while serializing extracted lines.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("unknown format '{0}' (available: rst, json, tag)")]
    Unknown(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
