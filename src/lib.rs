//! deparse extracts, resolves and orders the dependencies of web and C
//! sources.
//!
//! Source files declare what they provide and what they require through
//! format-specific lines: `@import` in Sugar, `require()` and `import` in
//! JavaScript, `<script(src=..)` in PAML templates, `@include` in PCSS and
//! `#include` in C. deparse turns these declarations into
//! [`DependencyItem`](core::DependencyItem)s, maps each item to files through a
//! search path, optionally recurses into those files, and orders everything so
//! that dependencies come before their dependents.
//!
//! # Architecture
//!
//! - [`extract`] - the line-oriented extraction engine, the rule tables of
//!   the built-in formats and the [`FormatRegistry`](extract::FormatRegistry)
//! - [`resolver`] - maps items to candidate files by kind-specific conventions
//! - [`tracker`] - crawls entry files, aggregates the graph and sorts it into
//!   load order
//! - [`graph`] - DOT and PlantUML renderings of the aggregated graph
//! - [`ops`] - one function per command-line operation
//! - [`config`] - the optional `deparse.toml` settings
//! - [`cli`] - the `deparse` binary's command definitions
//!
//! # Example
//!
//! ```rust,no_run
//! use deparse::extract::FormatRegistry;
//! use deparse::ops;
//! use deparse::resolver::Resolver;
//!
//! let registry = FormatRegistry::builtin();
//! let resolver = Resolver::new().with_working_dir("site");
//! for item in ops::list_load_order(&["site/index.paml"], true, &registry, &resolver) {
//!     println!("{item}");
//! }
//! ```
//!
//! # Failure model
//!
//! A crawl never aborts because of one file. Unsupported extensions, unreadable
//! files, malformed declarations and unresolved requirements are recorded as
//! [`Diagnostic`](tracker::Diagnostic)s and logged through `tracing`, while
//! everything gathered from other files is kept.

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod extract;
pub mod graph;
pub mod ops;
pub mod resolver;
pub mod tracker;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
