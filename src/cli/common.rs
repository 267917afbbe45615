//! Shared state and output helpers for CLI commands.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::config::DeparseConfig;
use crate::extract::FormatRegistry;
use crate::resolver::Resolver;

/// Everything a command needs besides its own arguments.
#[derive(Debug)]
pub struct Settings {
    /// Formats known to this invocation.
    pub registry: FormatRegistry,
    /// Resolver built from the configured search paths.
    pub resolver: Resolver,
}

impl Settings {
    /// Load the configuration and build the registry and resolver from it.
    ///
    /// `verbose` from the command line adds to the configured flag.
    pub async fn load(config_path: Option<&Path>, verbose: bool) -> Result<Self> {
        let config = DeparseConfig::load(config_path).await?;
        let registry = config.registry().context("Invalid extension table")?;
        let resolver = config.resolver().with_verbose(config.verbose || verbose);
        Ok(Self {
            registry,
            resolver,
        })
    }
}

/// Serialization used by commands that print structured values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum StructuredFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

impl StructuredFormat {
    /// Serialize `value`, always ending with a newline.
    pub fn render<T: Serialize + ?Sized>(self, value: &T) -> Result<String> {
        let mut out = match self {
            Self::Json => {
                serde_json::to_string_pretty(value).context("Failed to serialize JSON output")?
            }
            Self::Yaml => serde_yaml::to_string(value).context("Failed to serialize YAML output")?,
        };
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}

/// Join `lines` with trailing newlines.
pub fn lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines.into_iter().fold(String::new(), |mut out, line| {
        out.push_str(line.as_ref());
        out.push('\n');
        out
    })
}
