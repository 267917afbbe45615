//! Print what each file provides, one `kind name` per line.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::common::{Settings, lines};
use crate::ops;
use crate::utils::fs::write_output;

/// List provided items of each file.
#[derive(Args, Debug)]
pub struct ProvidesCommand {
    /// The files to inspect
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Output file, `-` for stdout
    #[arg(short, long, default_value = "-")]
    output: String,
}

impl ProvidesCommand {
    pub(super) fn execute(self, settings: &Settings) -> Result<()> {
        let mut out = Vec::new();
        for path in &self.files {
            let provides = ops::list_provides(path, &settings.registry)?;
            out.extend(provides.iter().map(ToString::to_string));
        }
        write_output(&self.output, &lines(out))
    }
}
