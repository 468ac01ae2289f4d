//! Command-line interface for autoyaml
//!
//! Extracts documentation comments from YAML files and expands `autoyaml` directives in
//! reST documents.
//!
//! Usage:
//!   autoyaml extract `<file>` [--format rst|json|tag]      - Extract one YAML file
//!   autoyaml expand `<doc>` [--srcdir `<dir>`] [--output `<file>`] - Expand directives
//!   autoyaml deps `<doc>` [--srcdir `<dir>`]                - List YAML dependencies

mod commands;

use anyhow::{anyhow, Context, Result};
use autoyaml_config::{AutoYamlConfig, Loader};
use autoyaml_parser::autoyaml::Format;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Configuration file picked up from the working directory when present.
const LOCAL_CONFIG: &str = "autoyaml.toml";

#[derive(Debug, Parser)]
#[command(
    name = "autoyaml",
    version,
    about = "Extract documentation comments from YAML files",
    arg_required_else_help = true
)]
struct Cli {
    /// Configuration file layered over the defaults
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Override a setting, e.g. --set autoyaml_root=../config
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    overrides: Vec<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract the documentation of one YAML file
    Extract {
        /// Path to the YAML file
        path: PathBuf,

        /// Output format
        #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Rst)]
        format: OutputFormat,
    },
    /// Expand autoyaml directives in a reST document
    Expand {
        /// Path to the reST document
        document: PathBuf,

        /// Documentation source root (defaults to the document's directory)
        #[arg(long)]
        srcdir: Option<PathBuf>,

        /// Write the expanded document here instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Print the YAML files a document depends on
    Deps {
        /// Path to the reST document
        document: PathBuf,

        /// Documentation source root (defaults to the document's directory)
        #[arg(long)]
        srcdir: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Extracted markup text
    Rst,
    /// Every entry with its origin and kind
    Json,
    /// `source:line <kind> text` debugging view
    Tag,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Rst => Format::Rst,
            OutputFormat::Json => Format::Json,
            OutputFormat::Tag => Format::Tag,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

/// Uses `RUST_LOG` if set, otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref(), &cli.overrides)?;

    match cli.command {
        Command::Extract { path, format } => {
            print!("{}", commands::extract(&config, &path, format.into())?);
        }
        Command::Expand {
            document,
            srcdir,
            output,
        } => {
            let (expanded, env) = commands::expand(&config, &document, srcdir.as_deref())?;
            tracing::debug!(
                dependencies = env.dependencies().len(),
                "expanded {}",
                document.display()
            );
            match output {
                Some(output) => fs::write(&output, expanded)
                    .with_context(|| format!("failed to write \"{}\"", output.display()))?,
                None => print!("{}", expanded),
            }
        }
        Command::Deps { document, srcdir } => {
            print!("{}", commands::deps(&config, &document, srcdir.as_deref())?);
        }
    }
    Ok(())
}

fn load_config(path: Option<&PathBuf>, overrides: &[String]) -> Result<AutoYamlConfig> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    for entry in overrides {
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("override '{}' is not of the form KEY=VALUE", entry))?;
        loader = loader.set_override(key.trim(), value.to_string())?;
    }
    Ok(loader.build()?)
}
