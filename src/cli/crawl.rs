//! Print the full crawl result.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::common::{Settings, StructuredFormat};
use crate::ops;
use crate::utils::fs::write_output;

/// Crawl the files and print provides, requires, resolved paths and
/// diagnostics.
#[derive(Args, Debug)]
pub struct CrawlCommand {
    /// Entry files
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Follow resolved requirements into their files
    #[arg(short, long)]
    recursive: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: StructuredFormat,

    /// Output file, `-` for stdout
    #[arg(short, long, default_value = "-")]
    output: String,
}

impl CrawlCommand {
    pub(super) fn execute(self, settings: &Settings) -> Result<()> {
        let result = ops::crawl(&self.files, self.recursive, &settings.registry, &settings.resolver);
        if result.has_errors() {
            tracing::warn!("Some files were skipped, see diagnostics");
        }
        write_output(&self.output, &self.format.render(&result)?)
    }
}
