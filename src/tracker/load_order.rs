//! Load ordering and cycle reporting.
//!
//! [`sort_requires`] keeps the historical, cycle-tolerant ordering: seeds are
//! taken by increasing number of direct dependencies and each one is emitted
//! after a depth-first walk of its dependencies. An item reached again while
//! its own walk is still in progress is not revisited, so cycles terminate
//! but the order inside a cycle is arbitrary.
//!
//! The cycles themselves are reported separately by [`find_cycles`], which
//! runs Tarjan's algorithm over the same adjacency.

use indexmap::{IndexMap, IndexSet};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use crate::core::DependencyItem;

/// Adjacency from a provided item to the items required alongside it.
pub type Nodes = IndexMap<DependencyItem, IndexSet<DependencyItem>>;

/// Order `requires` so that, as far as the graph allows, every item comes
/// after the items it depends on.
///
/// Every seed and every item reachable from one through `nodes` appears
/// exactly once. A direct self-dependency is ignored.
#[must_use]
pub fn sort_requires(requires: &IndexSet<DependencyItem>, nodes: &Nodes) -> Vec<DependencyItem> {
    let mut seeds: Vec<&DependencyItem> = requires.iter().collect();
    seeds.sort_by_key(|item| nodes.get(*item).map_or(0, IndexSet::len));

    let mut loaded = IndexSet::new();
    for seed in seeds {
        load(seed, nodes, &mut loaded);
    }
    loaded.into_iter().collect()
}

fn load(item: &DependencyItem, nodes: &Nodes, loaded: &mut IndexSet<DependencyItem>) {
    if loaded.contains(item) {
        return;
    }

    // provisional slot; marks the item as in progress
    let index = loaded.len();
    loaded.insert(item.clone());
    for dependency in nodes.get(item).into_iter().flatten() {
        if dependency == item {
            continue;
        }
        load(dependency, nodes, loaded);
    }

    loaded.shift_remove_index(index);
    loaded.insert(item.clone());
}

/// Requirement graph over dependency items, edges pointing from a provided
/// item to what it requires.
struct RequirementGraph<'a> {
    graph: DiGraph<&'a DependencyItem, ()>,
    node_map: HashMap<&'a DependencyItem, NodeIndex>,
}

impl<'a> RequirementGraph<'a> {
    fn from_nodes(nodes: &'a Nodes) -> Self {
        let mut graph = Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        };
        for (item, dependencies) in nodes {
            for dependency in dependencies {
                graph.add_dependency(item, dependency);
            }
        }
        graph
    }

    fn ensure_node(&mut self, item: &'a DependencyItem) -> NodeIndex {
        if let Some(&index) = self.node_map.get(item) {
            index
        } else {
            let index = self.graph.add_node(item);
            self.node_map.insert(item, index);
            index
        }
    }

    fn add_dependency(&mut self, from: &'a DependencyItem, to: &'a DependencyItem) {
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);
        if !self.graph.contains_edge(from_idx, to_idx) {
            self.graph.add_edge(from_idx, to_idx, ());
        }
    }

    fn cycles(&self) -> Vec<Vec<DependencyItem>> {
        let mut cycles: Vec<Vec<DependencyItem>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| match component.as_slice() {
                [single] => self.graph.contains_edge(*single, *single),
                _ => true,
            })
            .map(|component| {
                let mut items: Vec<DependencyItem> =
                    component.into_iter().map(|index| self.graph[index].clone()).collect();
                items.sort();
                items
            })
            .collect();
        cycles.sort();
        cycles
    }
}

/// Strongly connected components of more than one item, plus items that
/// require themselves. Items inside a cycle are sorted, and so are the cycles.
#[must_use]
pub fn find_cycles(nodes: &Nodes) -> Vec<Vec<DependencyItem>> {
    RequirementGraph::from_nodes(nodes).cycles()
}
