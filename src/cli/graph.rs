//! Render the requirement graph of a recursive crawl.
//!
//! ```bash
//! deparse graph site/index.paml > deps.puml
//! deparse graph --format dot -t 'js:*' -t 'sjs:*' app.sjs | dot -Tsvg > deps.svg
//! ```

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use super::common::Settings;
use crate::graph::{GraphFormat, TypeFilter, render};
use crate::tracker::Tracker;
use crate::utils::fs::write_output;

/// Graph syntaxes accepted on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum GraphSyntax {
    /// Graphviz.
    Dot,
    /// PlantUML.
    #[default]
    Plantuml,
}

impl From<GraphSyntax> for GraphFormat {
    fn from(syntax: GraphSyntax) -> Self {
        match syntax {
            GraphSyntax::Dot => Self::Dot,
            GraphSyntax::Plantuml => Self::PlantUml,
        }
    }
}

/// Crawl the files recursively and print the graph of provided items.
#[derive(Args, Debug)]
pub struct GraphCommand {
    /// Entry files
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Only keep items whose kind matches this wildcard, may be repeated
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    types: Vec<String>,

    /// Output syntax
    #[arg(short, long, value_enum, default_value_t)]
    format: GraphSyntax,

    /// Output file, `-` for stdout
    #[arg(short, long, default_value = "-")]
    output: String,
}

impl GraphCommand {
    pub(super) fn execute(self, settings: &Settings) -> Result<()> {
        let filter = TypeFilter::new(&self.types)?;
        let mut tracker = Tracker::new(&settings.registry, &settings.resolver);
        tracker.crawl(&self.files, true);
        write_output(&self.output, &render(tracker.nodes(), &filter, self.format.into()))
    }
}
