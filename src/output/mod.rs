//! Rendering of query outcomes
//!
//! Outcomes are written in request order, one block per package, with
//! failures in the position of the request that produced them.

pub mod json;
pub mod text;

use std::io::{self, Write};

use crate::query::types::QueryOutcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Include the long description in metadata output
    pub show_description: bool,
}

pub fn render<W: Write>(
    outcomes: &[QueryOutcome],
    options: &RenderOptions,
    writer: &mut W,
) -> io::Result<()> {
    for outcome in outcomes {
        match options.format {
            OutputFormat::Text => text::write_outcome(writer, outcome, options)?,
            OutputFormat::Json => json::write_outcome(writer, outcome, options)?,
        }
    }
    writer.flush()
}
