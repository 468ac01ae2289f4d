//! Comment extraction
//!
//! A single forward pass over the lines of a YAML file. Each line is classified by its
//! prefix and, depending on the scan state, either contributes documentation text or
//! closes the current block.
//!
//! Rules, checked in order for every line:
//!
//! 1. `doc_delimiter` prefix: a block starts (or restarts). The delimiter and at most one
//!    following space are removed.
//! 2. `doc_parameter` prefix while inside a parameter sub-block: a separator, then the
//!    line minus its first two characters.
//! 3. `doc_parameter` prefix while inside a block: the parameter sub-block starts. Same
//!    output as rule 2.
//! 4. `comment` prefix while inside a block: a separator, then the line minus the comment
//!    prefix and at most one following space.
//! 5. Anything else ends the block and emits a separator.
//!
//! Parameter lines always drop exactly two characters whatever the configured
//! `doc_parameter` is and whatever follows it. Existing documents are written against
//! that behavior, so it stays.
//!
//! Every emitted line keeps the path and 1-based line number it came from, so markup
//! errors found later can point back into the YAML file.

use super::markers::MarkerSet;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Number of characters removed from the front of a parameter line.
pub const PARAMETER_PREFIX_WIDTH: usize = 2;

/// What produced an extracted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    BlockStart,
    Comment,
    Parameter,
    ParameterContinuation,
    Separator,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineKind::BlockStart => "block-start",
            LineKind::Comment => "comment",
            LineKind::Parameter => "parameter",
            LineKind::ParameterContinuation => "parameter-continuation",
            LineKind::Separator => "separator",
        };
        f.write_str(name)
    }
}

/// One line of extracted documentation, tied to its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLine {
    pub text: String,
    pub source: PathBuf,
    pub line: usize,
    pub kind: LineKind,
}

impl SourceLine {
    fn new(text: &str, source: &Path, line: usize, kind: LineKind) -> Self {
        SourceLine {
            text: text.to_string(),
            source: source.to_path_buf(),
            line,
            kind,
        }
    }

    fn separator(source: &Path, line: usize) -> Self {
        SourceLine::new("", source, line, LineKind::Separator)
    }

    pub fn is_separator(&self) -> bool {
        self.kind == LineKind::Separator
    }
}

/// The ordered output of a scan. Append-only while the scan runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultBuffer {
    lines: Vec<SourceLine>,
}

impl ResultBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, line: SourceLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SourceLine> {
        self.lines.iter()
    }

    /// The text of every entry, separators included.
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    /// True when nothing but separators was extracted.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(SourceLine::is_separator)
    }
}

impl<'a> IntoIterator for &'a ResultBuffer {
    type Item = &'a SourceLine;
    type IntoIter = std::slice::Iter<'a, SourceLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Where the scan is relative to documentation blocks.
///
/// `InParameter` is always inside a block as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InBlock,
    InParameter,
}

impl ScanState {
    fn in_block(self) -> bool {
        self != ScanState::Outside
    }

    /// A delimiter line does not leave an open parameter sub-block.
    fn enter_block(self) -> ScanState {
        match self {
            ScanState::InParameter => ScanState::InParameter,
            ScanState::Outside | ScanState::InBlock => ScanState::InBlock,
        }
    }
}

/// Scans text for documentation comments using a [`MarkerSet`].
///
/// The extractor holds no scan state between calls; every call starts outside any block.
#[derive(Debug, Clone)]
pub struct CommentExtractor<'m> {
    markers: &'m MarkerSet,
}

impl<'m> CommentExtractor<'m> {
    pub fn new(markers: &'m MarkerSet) -> Self {
        Self { markers }
    }

    /// Scan `source`, attributing every emitted line to `path`.
    pub fn extract_str(&self, source: &str, path: impl AsRef<Path>) -> ResultBuffer {
        let path = path.as_ref();
        let mut buffer = ResultBuffer::new();
        let mut state = ScanState::Outside;
        for (index, line) in split_lines(source).into_iter().enumerate() {
            state = self.scan_line(state, line, path, index + 1, &mut buffer);
        }
        buffer
    }

    fn scan_line(
        &self,
        state: ScanState,
        line: &str,
        path: &Path,
        linenum: usize,
        buffer: &mut ResultBuffer,
    ) -> ScanState {
        if let Some(rest) = line.strip_prefix(self.markers.doc_delimiter()) {
            buffer.push(SourceLine::new(
                strip_one_space(rest),
                path,
                linenum,
                LineKind::BlockStart,
            ));
            return state.enter_block();
        }

        if line.starts_with(self.markers.doc_parameter()) && state.in_block() {
            let kind = if state == ScanState::InParameter {
                LineKind::ParameterContinuation
            } else {
                LineKind::Parameter
            };
            buffer.push(SourceLine::separator(path, linenum));
            buffer.push(SourceLine::new(
                strip_parameter_prefix(line),
                path,
                linenum,
                kind,
            ));
            return ScanState::InParameter;
        }

        if state.in_block() {
            if let Some(rest) = line.strip_prefix(self.markers.comment()) {
                buffer.push(SourceLine::separator(path, linenum));
                buffer.push(SourceLine::new(
                    strip_one_space(rest),
                    path,
                    linenum,
                    LineKind::Comment,
                ));
                return state;
            }
        }

        // terminating paragraph break
        buffer.push(SourceLine::separator(path, linenum));
        ScanState::Outside
    }
}

/// Split text into lines the way universal-newline reading does.
///
/// `\n`, `\r\n` and a lone `\r` end a line, as do the other Unicode line boundaries
/// (`\x0b`, `\x0c`, `\x1c`-`\x1e`, `\u{85}`, `\u{2028}`, `\u{2029}`). A trailing
/// line break does not start an extra empty line.
pub fn split_lines(source: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = source.char_indices().peekable();
    while let Some((offset, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }
        lines.push(&source[start..offset]);
        start = offset + ch.len_utf8();
        if ch == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
            chars.next();
            start += 1;
        }
    }
    if start < source.len() {
        lines.push(&source[start..]);
    }
    lines
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn strip_one_space(text: &str) -> &str {
    text.strip_prefix(' ').unwrap_or(text)
}

fn strip_parameter_prefix(line: &str) -> &str {
    line.char_indices()
        .nth(PARAMETER_PREFIX_WIDTH)
        .map_or("", |(offset, _)| &line[offset..])
}
