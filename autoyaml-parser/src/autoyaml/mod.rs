//! Main module for autoyaml library functionality

pub mod directive;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod loader;
pub mod markers;

pub use directive::{expand_document, BuildEnvironment, Directive};
pub use error::{DirectiveError, ExtractError, FormatError, MarkerError};
pub use extraction::{CommentExtractor, LineKind, ResultBuffer, SourceLine};
pub use formats::Format;
pub use loader::{extract, SourceLoader};
pub use markers::MarkerSet;
