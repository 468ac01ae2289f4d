//! # autoyaml
//!
//! Pulls documentation out of YAML files.
//!
//! YAML configuration files often carry their own documentation as comments. This crate
//! scans such a file line by line and collects the comment lines written with the
//! documentation markers, so that the text can be dropped into a reST document.
//!
//! ```text
//! ### Database settings
//! # Everything the service needs to reach postgres.
//! database:
//!   ## host: server to connect to
//!   host: localhost
//! ```
//!
//! Layout
//!
//! src/autoyaml
//!   ├── markers      The prefixes that classify a line
//!   ├── extraction   The line scan itself
//!   ├── loader       File resolution and reading
//!   ├── directive    The `.. autoyaml::` directive and document expansion
//!   └── formats      Output of extracted lines
//!
//! The scan never interprets YAML. It only looks at line prefixes.

pub mod autoyaml;
