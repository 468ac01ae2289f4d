//! Configuration loader for autoyaml.
//!
//! `defaults/autoyaml.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user files and single-key
//! overrides on top of those defaults via [`Loader`] before deserializing into
//! [`AutoYamlConfig`].

use autoyaml_parser::autoyaml::{BuildEnvironment, MarkerError, MarkerSet};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../defaults/autoyaml.default.toml");

/// Keys accepted by [`Loader::set_override`].
pub const KEYS: [&str; 4] = [
    "autoyaml_root",
    "autoyaml_doc_delimiter",
    "autoyaml_doc_parameter",
    "autoyaml_comment",
];

/// Settings consumed by the directive and the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AutoYamlConfig {
    /// YAML root, relative to the documentation source root.
    pub autoyaml_root: String,
    pub autoyaml_doc_delimiter: String,
    pub autoyaml_doc_parameter: String,
    pub autoyaml_comment: String,
}

impl AutoYamlConfig {
    /// The configured markers, validated.
    pub fn markers(&self) -> Result<MarkerSet, MarkerError> {
        MarkerSet::new(
            &self.autoyaml_doc_delimiter,
            &self.autoyaml_doc_parameter,
            &self.autoyaml_comment,
        )
    }

    /// A build environment rooted at `srcdir` using these settings.
    pub fn environment(&self, srcdir: impl Into<PathBuf>) -> Result<BuildEnvironment, MarkerError> {
        Ok(BuildEnvironment::new(
            srcdir,
            self.autoyaml_root.clone(),
            self.markers()?,
        ))
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Markers(#[from] MarkerError),

    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigLoadError>
    where
        I: Into<ValueKind>,
    {
        if !KEYS.contains(&key) {
            return Err(ConfigLoadError::UnknownKey(key.to_string()));
        }
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    ///
    /// The markers are validated here so that an empty marker is reported at load time.
    pub fn build(self) -> Result<AutoYamlConfig, ConfigLoadError> {
        let config: AutoYamlConfig = self.builder.build()?.try_deserialize()?;
        config.markers()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AutoYamlConfig, ConfigLoadError> {
    Loader::new().build()
}
