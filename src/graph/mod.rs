//! Textual renderings of the requirement graph.
//!
//! Nodes are the provided items of a crawl and edges go from a provided item
//! to each item required alongside it. A [`TypeFilter`] restricts both ends of
//! every edge to matching kinds.

use anyhow::{Context, Result};
use glob::Pattern;
use indexmap::IndexSet;
use std::fmt::Write;

use crate::core::DependencyItem;
use crate::tracker::load_order::Nodes;

/// Shell-style wildcard patterns over item kinds, such as `js:*` or `*:file`.
///
/// An empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct TypeFilter {
    patterns: Vec<Pattern>,
}

impl TypeFilter {
    /// Compile `patterns`.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                Pattern::new(p).with_context(|| format!("Invalid type pattern: {p}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            patterns,
        })
    }

    /// Whether the kind of `item` matches any pattern.
    #[must_use]
    pub fn matches(&self, item: &DependencyItem) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(&item.kind))
    }
}

/// Output syntax of [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphFormat {
    /// Graphviz `digraph`.
    Dot,
    /// PlantUML package diagram.
    #[default]
    PlantUml,
}

/// Render `nodes` restricted to `filter`.
#[must_use]
pub fn render(nodes: &Nodes, filter: &TypeFilter, format: GraphFormat) -> String {
    let mut kept = Vec::new();
    let mut edges = Vec::new();
    for (node, dependencies) in nodes {
        if !filter.matches(node) {
            continue;
        }
        kept.push(node);
        edges.extend(dependencies.iter().filter(|d| filter.matches(d)).map(|d| (node, d)));
    }

    match format {
        GraphFormat::Dot => dot(&kept, &edges),
        GraphFormat::PlantUml => plantuml(&kept, &edges),
    }
}

/// Stable integer key of `item`, handed out in first-seen order.
fn key<'a>(keys: &mut IndexSet<&'a DependencyItem>, item: &'a DependencyItem) -> usize {
    keys.insert_full(item).0
}

fn dot(nodes: &[&DependencyItem], edges: &[(&DependencyItem, &DependencyItem)]) -> String {
    let mut keys = IndexSet::new();
    let mut out = String::from("digraph G {\n");
    for node in nodes {
        let label = node.name.replace('"', "\\\"");
        let _ = writeln!(out, "{}[label=\"{label}\"]", key(&mut keys, node));
    }
    for (source, destination) in edges {
        let _ = writeln!(out, "{} -> {}", key(&mut keys, source), key(&mut keys, destination));
    }
    out.push_str("}\n");
    out
}

fn plantuml(nodes: &[&DependencyItem], edges: &[(&DependencyItem, &DependencyItem)]) -> String {
    let mut out = String::from("@startuml\nskinparam packageStyle rect\n");
    for node in nodes {
        let _ = writeln!(out, "package {} {{}}", node.name);
    }
    for (source, destination) in edges {
        let _ = writeln!(out, "{} +-- {}", source.name, destination.name);
    }
    out.push_str("@enduml\n");
    out
}
