//! Command handlers
//!
//! Each handler returns the text to print, so `main` owns all output.

use anyhow::{Context, Result};
use autoyaml_config::AutoYamlConfig;
use autoyaml_parser::autoyaml::{expand_document, BuildEnvironment, Format, SourceLoader};
use std::fs;
use std::path::{Path, PathBuf};

/// Extract one YAML file and serialize it.
pub fn extract(config: &AutoYamlConfig, path: &Path, format: Format) -> Result<String> {
    let loader = SourceLoader::new(config.markers()?);
    let buffer = loader.load(path)?;
    Ok(format.serialize(&buffer)?)
}

/// Expand every directive of `document`, returning the expanded text and the environment
/// holding the recorded dependencies.
pub fn expand(
    config: &AutoYamlConfig,
    document: &Path,
    srcdir: Option<&Path>,
) -> Result<(String, BuildEnvironment)> {
    let source = fs::read_to_string(document)
        .with_context(|| format!("failed to read document \"{}\"", document.display()))?;
    let srcdir = srcdir.map_or_else(|| document_dir(document), Path::to_path_buf);
    let mut env = config.environment(srcdir)?;
    let expanded = expand_document(&mut env, document, &source)?;
    Ok((expanded, env))
}

/// The resolved YAML files `document` depends on, one per line.
pub fn deps(config: &AutoYamlConfig, document: &Path, srcdir: Option<&Path>) -> Result<String> {
    let (_, env) = expand(config, document, srcdir)?;
    let mut out = String::new();
    for path in env.dependencies() {
        out.push_str(&path.display().to_string());
        out.push('\n');
    }
    Ok(out)
}

fn document_dir(document: &Path) -> PathBuf {
    match document.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_dir_defaults_to_current_directory() {
        assert_eq!(document_dir(Path::new("index.rst")), PathBuf::from("."));
        assert_eq!(
            document_dir(Path::new("docs/index.rst")),
            PathBuf::from("docs")
        );
    }
}
