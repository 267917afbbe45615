//! Graph crawling.
//!
//! A [`Tracker`] visits entry files, extracts their declarations, resolves
//! what they require and optionally recurses into the resolved files. It
//! accumulates an aggregate graph across every [`Tracker::crawl`] call and
//! hands out a [`CrawlResult`] with the requirements in load order.
//!
//! Nothing that goes wrong with a single file aborts a crawl. Unsupported
//! extensions, unreadable files, malformed declarations and unresolved
//! requirements each leave one [`Diagnostic`] and a `tracing` event; state
//! aggregated from other files is kept.
//!
//! # Composite paths
//!
//! A path that does not exist but contains `+` is read as a list of sibling
//! files: `lib/js/jquery.js+lodash.js` stands for `lib/js/jquery.js` and
//! `lib/js/lodash.js`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use deparse::extract::FormatRegistry;
//! use deparse::resolver::Resolver;
//! use deparse::tracker::Tracker;
//!
//! let registry = FormatRegistry::builtin();
//! let resolver = Resolver::new();
//! let mut tracker = Tracker::new(&registry, &resolver);
//! let result = tracker.crawl(&["site/index.paml"], true);
//! for item in &result.requires {
//!     println!("{item}");
//! }
//! ```

pub mod load_order;

use indexmap::{IndexMap, IndexSet};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::core::{DependencyItem, DeparseError};
use crate::extract::{FormatRegistry, extract_path};
use crate::resolver::Resolver;
use crate::utils::fs::absolutize;
use load_order::{Nodes, find_cycles, sort_requires};

/// What a crawl diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// No extractor for the file extension; the file was skipped.
    UnsupportedFormat,
    /// The file could not be read; it was skipped.
    Unreadable,
    /// A declaration in the file is malformed; the file contributed nothing.
    MalformedDeclaration,
    /// A requirement resolved to no file, so the crawl did not descend.
    UnresolvedDependency,
    /// Items depend on each other; their relative load order is arbitrary.
    CycleDetected,
}

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The result is complete but may be surprising.
    Warning,
    /// Part of the input was skipped.
    Error,
}

/// One recorded crawl problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Category of the problem.
    pub kind: DiagnosticKind,
    /// Severity of the problem.
    pub severity: Severity,
    /// The file concerned, if the problem is tied to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Human readable description.
    pub message: String,
}

/// Provided items of one visited file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvidedEntry {
    /// The visited file.
    pub path: PathBuf,
    /// What it provides, in declaration order.
    pub provides: Vec<DependencyItem>,
}

/// The aggregate result of one or more crawls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlResult {
    /// Provided items per visited file, in visit order.
    pub provides: Vec<ProvidedEntry>,
    /// Every required item, in load order.
    pub requires: Vec<DependencyItem>,
    /// Resolved paths per required item. Unresolved items have no entry.
    #[serde(serialize_with = "serialize_resolved")]
    pub resolved: IndexMap<DependencyItem, Vec<PathBuf>>,
    /// Everything that was skipped or looked suspicious.
    pub diagnostics: Vec<Diagnostic>,
}

impl CrawlResult {
    /// Resolved paths for `item`, if it was resolved.
    #[must_use]
    pub fn resolved_paths(&self, item: &DependencyItem) -> Option<&[PathBuf]> {
        self.resolved.get(item).map(Vec::as_slice)
    }

    /// Whether any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }
}

/// `resolved` has composite keys, so it is written as a list of
/// `{kind, name, paths}` records.
fn serialize_resolved<S: Serializer>(
    resolved: &IndexMap<DependencyItem, Vec<PathBuf>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    struct Entry<'a> {
        kind: &'a str,
        name: &'a str,
        paths: &'a [PathBuf],
    }

    let mut seq = serializer.serialize_seq(Some(resolved.len()))?;
    for (item, paths) in resolved {
        seq.serialize_element(&Entry {
            kind: &item.kind,
            name: &item.name,
            paths,
        })?;
    }
    seq.end()
}

/// Crawls files and aggregates their dependency graph.
pub struct Tracker<'a> {
    registry: &'a FormatRegistry,
    resolver: &'a Resolver,
    provides: Vec<ProvidedEntry>,
    requires: IndexSet<DependencyItem>,
    nodes: Nodes,
    resolved: IndexMap<DependencyItem, IndexSet<PathBuf>>,
    visited: IndexSet<PathBuf>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Tracker<'a> {
    /// A tracker with an empty graph.
    #[must_use]
    pub fn new(registry: &'a FormatRegistry, resolver: &'a Resolver) -> Self {
        Self {
            registry,
            resolver,
            provides: Vec::new(),
            requires: IndexSet::new(),
            nodes: Nodes::new(),
            resolved: IndexMap::new(),
            visited: IndexSet::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Visit every entry path, descending into resolved requirements when
    /// `recursive` is set, and return the aggregate so far.
    pub fn crawl<P: AsRef<Path>>(&mut self, entries: &[P], recursive: bool) -> CrawlResult {
        for entry in entries {
            self.visit(entry.as_ref(), recursive, None);
        }
        self.check_cycles();
        self.result()
    }

    /// The aggregate so far, requirements in load order.
    #[must_use]
    pub fn result(&self) -> CrawlResult {
        CrawlResult {
            provides: self.provides.clone(),
            requires: sort_requires(&self.requires, &self.nodes),
            resolved: self
                .resolved
                .iter()
                .map(|(item, paths)| (item.clone(), paths.iter().cloned().collect()))
                .collect(),
            diagnostics: self.diagnostics.clone(),
        }
    }

    /// Provided item to the items required by the files providing it.
    #[must_use]
    pub const fn nodes(&self) -> &Nodes {
        &self.nodes
    }

    /// Files visited so far, in visit order.
    pub fn visited(&self) -> impl Iterator<Item = &Path> + '_ {
        self.visited.iter().map(PathBuf::as_path)
    }

    /// Diagnostics recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn visit(&mut self, path: &Path, recursive: bool, kind: Option<&str>) {
        // resolver candidates are absolute, so entries must be too
        let path = &absolutize(path, &self.resolver.working_dir());
        if !path.exists()
            && let Some(siblings) = split_composite(path)
        {
            for sibling in siblings {
                self.visit(&sibling, recursive, kind);
            }
            return;
        }
        if self.visited.contains(path) {
            return;
        }
        if path.is_dir() {
            tracing::debug!("Skipping directory {}", path.display());
            return;
        }

        // mark before parsing so cycles stop here
        self.visited.insert(path.to_path_buf());

        let mut extractor = match self.registry.for_path(path) {
            Ok(extractor) => extractor,
            Err(err) => {
                self.report(DiagnosticKind::UnsupportedFormat, Severity::Error, path, &err);
                return;
            }
        };
        tracing::debug!("Parsing {} as {}", path.display(), extractor.format());
        let parsed = match extract_path(extractor.as_mut(), path, kind) {
            Ok(parsed) => parsed,
            Err(err @ DeparseError::MalformedDeclaration { .. }) => {
                self.report(DiagnosticKind::MalformedDeclaration, Severity::Error, path, &err);
                return;
            }
            Err(err) => {
                self.report(DiagnosticKind::Unreadable, Severity::Error, path, &err);
                return;
            }
        };

        self.provides.push(ProvidedEntry {
            path: path.to_path_buf(),
            provides: parsed.provides.clone(),
        });
        self.requires.extend(parsed.requires.iter().cloned());
        for provided in &parsed.provides {
            self.nodes.entry(provided.clone()).or_default().extend(parsed.requires.iter().cloned());
        }

        for dependency in &parsed.requires {
            if dependency.is_url() {
                continue;
            }
            let found: Vec<PathBuf> = self
                .resolver
                .resolve_with(extractor.as_ref(), dependency, path)
                .into_iter()
                .map(|candidate| candidate.path)
                .collect();
            if !found.is_empty() {
                self.resolved.entry(dependency.clone()).or_default().extend(found.iter().cloned());
            }

            if !recursive {
                continue;
            }
            if found.is_empty() {
                let err = DeparseError::UnresolvedDependency {
                    kind: dependency.kind.clone(),
                    name: dependency.name.clone(),
                    path: path.display().to_string(),
                };
                self.report(DiagnosticKind::UnresolvedDependency, Severity::Warning, path, &err);
                continue;
            }
            for child in &found {
                self.visit(child, recursive, Some(dependency.kind.as_str()));
            }
        }
    }

    fn check_cycles(&mut self) {
        self.diagnostics.retain(|d| d.kind != DiagnosticKind::CycleDetected);
        for cycle in find_cycles(&self.nodes) {
            let members = cycle.iter().map(ToString::to_string).collect::<Vec<_>>().join(" → ");
            tracing::warn!("Dependency cycle, load order is arbitrary: {members}");
            self.diagnostics.push(Diagnostic {
                kind: DiagnosticKind::CycleDetected,
                severity: Severity::Warning,
                path: None,
                message: format!("Dependency cycle: {members}"),
            });
        }
    }

    fn report(&mut self, kind: DiagnosticKind, severity: Severity, path: &Path, err: &DeparseError) {
        match severity {
            Severity::Error => tracing::error!("{err}"),
            Severity::Warning => tracing::warn!("{err}"),
        }
        self.diagnostics.push(Diagnostic {
            kind,
            severity,
            path: Some(path.to_path_buf()),
            message: err.to_string(),
        });
    }
}

/// Expand `dir/a.js+b.js` into `dir/a.js` and `dir/b.js`.
///
/// Returns `None` when the path holds no `+`.
#[must_use]
pub fn split_composite(path: &Path) -> Option<Vec<PathBuf>> {
    let text = path.to_str()?;
    if !text.contains('+') {
        return None;
    }
    let mut parts = text.split('+');
    let first = PathBuf::from(parts.next()?);
    let dir = first.parent().map(Path::to_path_buf).unwrap_or_default();
    let mut siblings = vec![first];
    siblings.extend(parts.filter(|p| !p.is_empty()).map(|p| dir.join(p)));
    Some(siblings)
}
