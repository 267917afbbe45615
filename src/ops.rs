//! Library entry points behind the CLI commands.
//!
//! Each operation takes the registry (and resolver, where needed) explicitly,
//! so callers decide which formats and search paths apply.

use indexmap::IndexMap;
use std::path::Path;

use crate::core::{Candidate, DependencyItem, DeparseError, ParseResult};
use crate::extract::{FormatRegistry, extract_path};
use crate::resolver::Resolver;
use crate::tracker::{CrawlResult, Tracker};

/// Extract the declarations of a single file.
pub fn parse_file(path: &Path, registry: &FormatRegistry) -> Result<ParseResult, DeparseError> {
    let mut extractor = registry.for_path(path)?;
    extract_path(extractor.as_mut(), path, None)
}

/// What a single file provides.
pub fn list_provides(
    path: &Path,
    registry: &FormatRegistry,
) -> Result<Vec<DependencyItem>, DeparseError> {
    parse_file(path, registry).map(|parsed| parsed.provides)
}

/// Files that could implement each bare symbol name, searched from `root`.
#[must_use]
pub fn find_symbol<S: AsRef<str>>(
    names: &[S],
    root: Option<&Path>,
    resolver: &Resolver,
    registry: &FormatRegistry,
) -> IndexMap<String, Vec<Candidate>> {
    resolver.find(names, root, registry)
}

/// Crawl `entries` with a fresh tracker.
#[must_use]
pub fn crawl<P: AsRef<Path>>(
    entries: &[P],
    recursive: bool,
    registry: &FormatRegistry,
    resolver: &Resolver,
) -> CrawlResult {
    Tracker::new(registry, resolver).crawl(entries, recursive)
}

/// Every item required by `entries`, in load order.
#[must_use]
pub fn list_load_order<P: AsRef<Path>>(
    entries: &[P],
    recursive: bool,
    registry: &FormatRegistry,
    resolver: &Resolver,
) -> Vec<DependencyItem> {
    crawl(entries, recursive, registry, resolver).requires
}
