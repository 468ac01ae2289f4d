//! The `autoyaml` directive
//!
//! A documentation source embeds the documentation of a YAML file with
//!
//! ```text
//! .. autoyaml:: config/service.yaml
//! ```
//!
//! The argument is resolved against the source root and the configured YAML root, the
//! file is extracted, and the directive line is replaced by the extracted markup. The
//! resolved path is recorded as a dependency of the build so that editing the YAML file
//! triggers a rebuild of the document.
//!
//! Directives shown inside literal blocks (the indented block after a `::` paragraph or
//! a `code-block` directive) are sample text and are left alone.

use super::error::{DirectiveError, ExtractError};
use super::extraction::{split_lines, ResultBuffer};
use super::loader::SourceLoader;
use super::markers::MarkerSet;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_ROOT: &str = "..";

static DIRECTIVE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<indent>[ \t]*)\.\.[ \t]+autoyaml::(?P<args>.*)$")
        .expect("directive pattern is valid")
});

static EXPLICIT_DIRECTIVE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*\.\.[ \t]+(?P<name>[A-Za-z0-9_.+:-]+?)::")
        .expect("explicit directive pattern is valid")
});

/// Directives whose body is literal text.
const LITERAL_DIRECTIVES: [&str; 4] = ["code", "code-block", "sourcecode", "parsed-literal"];

/// State shared by every directive of a build.
#[derive(Debug, Clone)]
pub struct BuildEnvironment {
    srcdir: PathBuf,
    root: String,
    loader: SourceLoader,
    dependencies: BTreeSet<PathBuf>,
}

impl BuildEnvironment {
    /// `srcdir` is the documentation source root, `root` the YAML root relative to it.
    pub fn new(srcdir: impl Into<PathBuf>, root: impl Into<String>, markers: MarkerSet) -> Self {
        Self {
            srcdir: srcdir.into(),
            root: root.into(),
            loader: SourceLoader::new(markers),
            dependencies: BTreeSet::new(),
        }
    }

    pub fn srcdir(&self) -> &Path {
        &self.srcdir
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn loader(&self) -> &SourceLoader {
        &self.loader
    }

    /// Resolve a directive argument to the absolute path of the YAML file it names.
    ///
    /// A relative `srcdir` is taken relative to the current directory.
    pub fn resolve(&self, argument: &str) -> Result<PathBuf, ExtractError> {
        let joined = self.srcdir.join(format!("{}/{}", self.root, argument));
        let absolute = std::path::absolute(&joined).map_err(|source| ExtractError::Io {
            location: joined.clone(),
            source,
        })?;
        Ok(normalize_path(&absolute))
    }

    pub fn record_dependency(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        tracing::debug!(location = %path.display(), "recording dependency");
        self.dependencies.insert(path);
    }

    /// Every file recorded so far, in path order.
    pub fn dependencies(&self) -> &BTreeSet<PathBuf> {
        &self.dependencies
    }
}

/// One `autoyaml` directive found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub indent: String,
    pub argument: String,
    /// 1-based line of the directive in its document.
    pub line: usize,
}

impl Directive {
    /// Recognize a directive on `text`. Returns `Ok(None)` for any other line.
    pub fn parse(document: &Path, line: usize, text: &str) -> Result<Option<Self>, DirectiveError> {
        let Some(captures) = DIRECTIVE_PATTERN.captures(text) else {
            return Ok(None);
        };
        let mut args = captures["args"].split_whitespace();
        let argument = args.next().ok_or_else(|| DirectiveError::MissingArgument {
            document: document.to_path_buf(),
            line,
        })?;
        if args.next().is_some() {
            return Err(DirectiveError::TooManyArguments {
                document: document.to_path_buf(),
                line,
            });
        }
        tracing::trace!(document = %document.display(), line, argument, "found autoyaml directive");
        Ok(Some(Directive {
            indent: captures["indent"].to_string(),
            argument: argument.to_string(),
            line,
        }))
    }

    /// Extract the file this directive names and record it as a dependency.
    pub fn run(
        &self,
        env: &mut BuildEnvironment,
        document: &Path,
    ) -> Result<ResultBuffer, DirectiveError> {
        let location = env
            .resolve(&self.argument)
            .map_err(|err| self.error(document, err))?;
        let buffer = env
            .loader()
            .load(&location)
            .map_err(|err| self.error(document, err))?;
        env.record_dependency(location);
        Ok(buffer)
    }

    fn error(&self, document: &Path, err: ExtractError) -> DirectiveError {
        match err {
            ExtractError::NotAFile { location } => DirectiveError::NotAFile {
                document: document.to_path_buf(),
                line: self.line,
                location,
            },
            other => DirectiveError::Extract {
                document: document.to_path_buf(),
                line: self.line,
                source: other,
            },
        }
    }

    /// The extracted lines, indented like the directive.
    fn render(&self, buffer: &ResultBuffer, out: &mut Vec<String>) {
        for line in buffer {
            if line.text.is_empty() {
                out.push(String::new());
            } else {
                out.push(format!("{}{}", self.indent, line.text));
            }
        }
    }
}

/// Replace every `autoyaml` directive in `source` with the documentation it names.
///
/// Other lines, and anything inside a literal block, pass through untouched. The first
/// failing directive aborts the expansion.
pub fn expand_document(
    env: &mut BuildEnvironment,
    document: impl AsRef<Path>,
    source: &str,
) -> Result<String, DirectiveError> {
    let document = document.as_ref();
    let mut out = Vec::new();
    let mut literal = LiteralBlock::default();
    for (index, text) in split_lines(source).into_iter().enumerate() {
        if literal.contains(text) {
            out.push(text.to_string());
            continue;
        }
        match Directive::parse(document, index + 1, text)? {
            Some(directive) => {
                let buffer = directive.run(env, document)?;
                directive.render(&buffer, &mut out);
            }
            None => out.push(text.to_string()),
        }
        literal.observe(text);
    }
    let mut expanded = out.join("\n");
    if source.ends_with(['\n', '\r']) {
        expanded.push('\n');
    }
    Ok(expanded)
}

/// The literal block opened by the last `::` paragraph or literal directive, if any.
#[derive(Debug, Default)]
struct LiteralBlock {
    opener_indent: Option<usize>,
}

impl LiteralBlock {
    /// Whether `text` is part of the open literal block. A line indented no deeper than
    /// the opening line closes it.
    fn contains(&mut self, text: &str) -> bool {
        let Some(opener_indent) = self.opener_indent else {
            return false;
        };
        if text.trim().is_empty() || indent_width(text) > opener_indent {
            return true;
        }
        self.opener_indent = None;
        false
    }

    fn observe(&mut self, text: &str) {
        if opens_literal_block(text) {
            self.opener_indent = Some(indent_width(text));
        }
    }
}

fn opens_literal_block(text: &str) -> bool {
    if let Some(captures) = EXPLICIT_DIRECTIVE_PATTERN.captures(text) {
        return LITERAL_DIRECTIVES.contains(&&captures["name"]);
    }
    let trimmed = text.trim();
    !trimmed.starts_with("..") && trimmed.ends_with("::")
}

fn indent_width(text: &str) -> usize {
    text.chars().take_while(|ch| ch.is_whitespace()).count()
}

/// Lexically normalize a path: drop `.` and fold `..` into the preceding component.
///
/// The filesystem is never consulted, so symlinks are not resolved.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
