//! Configuration management for deparse
//!
//! Settings are optional: without any file, deparse searches the working
//! directory and the directory of each requesting file, using the built-in
//! subdirectory conventions and extension table.
//!
//! # Configuration Files
//!
//! The first file found wins:
//!
//! 1. the path given with `--config`
//! 2. the path in the `DEPARSE_CONFIG` environment variable
//! 3. `deparse.toml` in the working directory
//! 4. `~/.deparse/config.toml`
//!
//! ```toml
//! search_paths = ["vendor"]
//!
//! [subdirs]
//! "css:module" = ["styles", ""]
//!
//! [extensions]
//! mjs = "js"
//! ```
//!
//! # Modules
//!
//! - `settings` - the [`DeparseConfig`] schema and its lookup rules
//! - `parser` - generic TOML parsing with path context

mod parser;
mod settings;

pub use parser::parse_config;
pub use settings::DeparseConfig;
