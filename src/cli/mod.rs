//! Command-line interface for deparse.
//!
//! The binary is a thin layer over [`crate::ops`]: every command loads the
//! [`DeparseConfig`](crate::config::DeparseConfig), builds the format registry
//! and resolver it describes, runs one library operation and prints the
//! result.
//!
//! # Commands
//!
//! - `list` - required items of entry files in load order
//! - `parse` - the raw parse result of each file
//! - `provides` - what each file provides
//! - `find` - files that could implement a symbol
//! - `crawl` - the full crawl result with diagnostics
//! - `graph` - the requirement graph as DOT or PlantUML
//!
//! # Global options
//!
//! ```bash
//! deparse --verbose list -r site/index.paml
//! deparse -q crawl --format yaml app.js
//! deparse --config ./ci.toml find jquery
//! ```

mod common;
mod crawl;
mod find;
mod graph;
mod list;
mod parse;
mod provides;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use common::StructuredFormat;

/// Extracts, resolves and orders source dependencies.
#[derive(Parser, Debug)]
#[command(
    name = "deparse",
    about = "Extract and order dependencies of web and C sources",
    version,
    author,
    long_about = "deparse reads PAML, Sugar, JavaScript, PCSS and C files, resolves what they \
                  require against a search path and prints the result in load order."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log crawl progress and report unresolved items
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file, instead of `DEPARSE_CONFIG` or `deparse.toml`
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List required items in load order
    List(list::ListCommand),
    /// Print the parse result of each file
    Parse(parse::ParseCommand),
    /// Print what each file provides
    Provides(provides::ProvidesCommand),
    /// Find files that could implement a symbol
    Find(find::FindCommand),
    /// Print the full crawl result
    Crawl(crawl::CrawlCommand),
    /// Render the requirement graph
    Graph(graph::GraphCommand),
}

impl Cli {
    /// Log filter directive for the global flags.
    ///
    /// `--verbose` selects `debug` and `--quiet` selects `error`. Otherwise
    /// `RUST_LOG` applies, falling back to `warn`.
    #[must_use]
    pub fn log_filter(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }

    /// Run the selected command.
    pub async fn execute(self) -> Result<()> {
        let settings = common::Settings::load(self.config.as_deref(), self.verbose).await?;

        match self.command {
            Commands::List(cmd) => cmd.execute(&settings),
            Commands::Parse(cmd) => cmd.execute(&settings),
            Commands::Provides(cmd) => cmd.execute(&settings),
            Commands::Find(cmd) => cmd.execute(&settings),
            Commands::Crawl(cmd) => cmd.execute(&settings),
            Commands::Graph(cmd) => cmd.execute(&settings),
        }
    }
}
