//! Find files that could implement a symbol.
//!
//! ```bash
//! deparse find jquery widgets
//! deparse find --root site -I vendor --format json theme
//! ```

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use indexmap::IndexMap;
use std::fmt::Write;
use std::path::PathBuf;

use super::common::{Settings, StructuredFormat};
use crate::core::Candidate;
use crate::ops;
use crate::utils::fs::write_output;

/// Output formats of `find`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum FindFormat {
    /// One heading per name followed by `kind path` lines.
    #[default]
    Text,
    /// A JSON object from name to candidates.
    Json,
}

/// Search every registered format for the given names.
#[derive(Args, Debug)]
pub struct FindCommand {
    /// Bare symbol names
    #[arg(required = true, value_name = "NAME")]
    names: Vec<String>,

    /// Directory the search is anchored at (defaults to the working directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Extra search directory, may be repeated
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    include: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: FindFormat,

    /// Output file, `-` for stdout
    #[arg(short, long, default_value = "-")]
    output: String,
}

impl FindCommand {
    pub(super) fn execute(self, settings: &Settings) -> Result<()> {
        let mut resolver = settings.resolver.clone();
        for dir in &self.include {
            resolver.add_path(dir);
        }

        let found =
            ops::find_symbol(&self.names, self.root.as_deref(), &resolver, &settings.registry);
        let out = match self.format {
            FindFormat::Json => StructuredFormat::Json.render(&found)?,
            FindFormat::Text => text(&found, self.output == "-"),
        };
        write_output(&self.output, &out)
    }
}

fn text(found: &IndexMap<String, Vec<Candidate>>, color: bool) -> String {
    let mut out = String::new();
    for (name, candidates) in found {
        if color {
            let _ = writeln!(out, "{}", name.bold());
        } else {
            let _ = writeln!(out, "{name}");
        }
        if candidates.is_empty() {
            out.push_str("  (not found)\n");
        }
        for candidate in candidates {
            let _ = writeln!(out, "  {} {}", candidate.kind, candidate.path.display());
        }
    }
    out
}
