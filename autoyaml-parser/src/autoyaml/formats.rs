//! Output formats for extracted documentation
//!
//! - `rst`: the extracted markup text, one line per entry
//! - `json`: every entry with its origin and kind
//! - `tag`: a line-oriented debugging view, `source:line <kind> text`

use super::error::FormatError;
use super::extraction::ResultBuffer;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Rst,
    Json,
    Tag,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Rst, Format::Json, Format::Tag];

    pub fn name(&self) -> &'static str {
        match self {
            Format::Rst => "rst",
            Format::Json => "json",
            Format::Tag => "tag",
        }
    }

    pub fn serialize(&self, buffer: &ResultBuffer) -> Result<String, FormatError> {
        match self {
            Format::Rst => Ok(to_rst(buffer)),
            Format::Json => to_json(buffer),
            Format::Tag => Ok(to_tag(buffer)),
        }
    }
}

impl FromStr for Format {
    type Err = FormatError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.name() == name)
            .ok_or_else(|| FormatError::Unknown(name.to_string()))
    }
}

pub fn to_rst(buffer: &ResultBuffer) -> String {
    let mut out = String::new();
    for line in buffer {
        out.push_str(&line.text);
        out.push('\n');
    }
    out
}

pub fn to_json(buffer: &ResultBuffer) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(buffer)?)
}

pub fn to_tag(buffer: &ResultBuffer) -> String {
    let mut out = String::new();
    for line in buffer {
        out.push_str(&format!(
            "{}:{} <{}>",
            line.source.display(),
            line.line,
            line.kind
        ));
        if !line.text.is_empty() {
            out.push(' ');
            out.push_str(&line.text);
        }
        out.push('\n');
    }
    out
}
