//! Module import graph implementation using petgraph.
//!
//! Nodes are snapshot files, edges point from the importing file to the
//! imported one. Parallel edges are kept: two import statements between the
//! same pair of files are two edges.

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use crate::analysis::imports::Dependency;
use crate::snapshot::basename;

/// A file in the module graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNode {
    /// Snapshot path (e.g., "src/api/client.ts")
    pub path: String,
}

impl ModuleNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Display label: the path's final segment.
    pub fn label(&self) -> &str {
        basename(&self.path)
    }
}

/// A directed graph of import relationships between snapshot files.
///
/// # Example
///
/// ```rust
/// use modscope::graph::ModuleGraph;
///
/// let mut graph = ModuleGraph::new();
/// graph.add_module("src/a.ts");
/// graph.add_module("src/b.ts");
///
/// assert!(graph.add_edge("src/a.ts", "src/b.ts"));
/// assert!(!graph.add_edge("src/a.ts", "src/missing.ts"));
///
/// assert_eq!(graph.in_degree("src/b.ts"), 1);
/// assert_eq!(graph.successors("src/a.ts"), vec!["src/b.ts"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    graph: DiGraph<ModuleNode, ()>,
    /// Maps paths to their node indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new graph with pre-allocated capacity.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, edges),
            node_indices: HashMap::with_capacity(nodes),
        }
    }

    /// Builds the graph for a file set: one node per path (in the given
    /// order), one edge per dependency whose endpoints are both present.
    pub fn from_dependencies<'a>(
        paths: impl IntoIterator<Item = &'a str>,
        dependencies: &[Dependency],
    ) -> Self {
        let paths: Vec<&str> = paths.into_iter().collect();
        let mut graph = Self::with_capacity(paths.len(), dependencies.len());

        for path in paths {
            graph.add_module(path);
        }
        for dep in dependencies {
            graph.add_edge(&dep.from, &dep.to);
        }

        graph
    }

    /// Adds a module, returning the existing index if the path is known.
    pub fn add_module(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(path) {
            return idx;
        }

        let idx = self.graph.add_node(ModuleNode::new(path));
        self.node_indices.insert(path.to_string(), idx);
        idx
    }

    /// Adds an import edge. Returns `false` if either module is unknown.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        let (Some(&from_idx), Some(&to_idx)) =
            (self.node_indices.get(from), self.node_indices.get(to))
        else {
            return false;
        };

        self.graph.add_edge(from_idx, to_idx, ());
        true
    }

    pub fn get_node(&self, path: &str) -> Option<&ModuleNode> {
        self.node_indices
            .get(path)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// All module paths in insertion order.
    pub fn paths(&self) -> Vec<&str> {
        self.graph.node_weights().map(|n| n.path.as_str()).collect()
    }

    /// Imported modules of `path`, in edge insertion order, repeated once
    /// per edge.
    pub fn successors(&self, path: &str) -> Vec<&str> {
        self.neighbors(path, Direction::Outgoing)
    }

    /// Importing modules of `path`, in edge insertion order, repeated once
    /// per edge.
    pub fn dependents(&self, path: &str) -> Vec<&str> {
        self.neighbors(path, Direction::Incoming)
    }

    fn neighbors(&self, path: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(path) else {
            return Vec::new();
        };

        // petgraph walks a node's edge list newest-first
        let mut found: Vec<&str> = self
            .graph
            .edges_directed(idx, direction)
            .filter_map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                self.graph.node_weight(other)
            })
            .map(|node| node.path.as_str())
            .collect();
        found.reverse();
        found
    }

    /// Number of edges targeting `path`.
    pub fn in_degree(&self, path: &str) -> usize {
        self.degree(path, Direction::Incoming)
    }

    /// Number of edges originating from `path`.
    pub fn out_degree(&self, path: &str) -> usize {
        self.degree(path, Direction::Outgoing)
    }

    fn degree(&self, path: &str, direction: Direction) -> usize {
        self.node_indices
            .get(path)
            .map(|&idx| self.graph.edges_directed(idx, direction).count())
            .unwrap_or(0)
    }

    /// Checks if the graph contains at least one cycle.
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, path: &str) -> bool {
        self.node_indices.contains_key(path)
    }
}
