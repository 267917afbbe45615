//! Print the parse result of each file.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::common::{Settings, StructuredFormat};
use crate::ops;
use crate::utils::fs::write_output;

/// Extract declarations without resolving anything.
///
/// Fails on the first file that cannot be parsed.
#[derive(Args, Debug)]
pub struct ParseCommand {
    /// The files to parse
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: StructuredFormat,

    /// Output file, `-` for stdout
    #[arg(short, long, default_value = "-")]
    output: String,
}

impl ParseCommand {
    pub(super) fn execute(self, settings: &Settings) -> Result<()> {
        let parsed = self
            .files
            .iter()
            .map(|path| ops::parse_file(path, &settings.registry))
            .collect::<Result<Vec<_>, _>>()?;
        write_output(&self.output, &self.format.render(&parsed)?)
    }
}
