//! List required items in load order.
//!
//! ```bash
//! deparse list -r site/index.paml            # names
//! deparse list -r -p -t 'js:*' site/*.paml   # resolved JavaScript paths
//! deparse list -o deps.txt app.sjs
//! ```

use anyhow::Result;
use clap::Args;
use indexmap::IndexSet;
use std::path::PathBuf;

use super::common::{Settings, lines};
use crate::graph::TypeFilter;
use crate::ops;
use crate::tracker::CrawlResult;
use crate::utils::fs::write_output;

/// Print the names, or resolved paths, of everything the files require.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// The files to extract dependencies from
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Follow resolved requirements into their files
    #[arg(short, long)]
    recursive: bool,

    /// Only list items whose kind matches this wildcard, may be repeated
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    types: Vec<String>,

    /// Print resolved file paths instead of names
    #[arg(short = 'p', long = "path")]
    show_path: bool,

    /// Output file, `-` for stdout
    #[arg(short, long, default_value = "-")]
    output: String,
}

impl ListCommand {
    pub(super) fn execute(self, settings: &Settings) -> Result<()> {
        let filter = TypeFilter::new(&self.types)?;
        let result = ops::crawl(&self.files, self.recursive, &settings.registry, &settings.resolver);
        write_output(&self.output, &lines(listing(&result, &filter, self.show_path)))
    }
}

/// Matching names or paths in load order, each once.
fn listing(result: &CrawlResult, filter: &TypeFilter, show_path: bool) -> IndexSet<String> {
    let mut seen = IndexSet::new();
    for item in result.requires.iter().filter(|i| filter.matches(i)) {
        if show_path {
            for path in result.resolved_paths(item).unwrap_or_default() {
                seen.insert(path.display().to_string());
            }
        } else {
            seen.insert(item.name.clone());
        }
    }
    seen
}
