//! Circular import detection.
//!
//! Depth-first search from every unvisited module in snapshot order. Meeting
//! a neighbor that is still on the current path closes a cycle: the path
//! slice from that neighbor to the current node.
//!
//! Cycles are deduplicated by their sorted vertex set, so two different
//! directed cycles over the same files are reported once.

use std::collections::HashSet;

use crate::graph::ModuleGraph;
use crate::snapshot::basename;

/// Detected cycles in two forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cycles {
    /// Full snapshot paths, for flagging files.
    pub cycle_files: Vec<Vec<String>>,
    /// Basename-only labels, for display.
    pub cycles: Vec<Vec<String>>,
}

impl Cycles {
    pub fn is_empty(&self) -> bool {
        self.cycle_files.is_empty()
    }
}

struct Search<'g> {
    graph: &'g ModuleGraph,
    visited: HashSet<&'g str>,
    on_path: HashSet<&'g str>,
    path: Vec<&'g str>,
    found: Vec<Vec<&'g str>>,
    seen_sets: HashSet<Vec<&'g str>>,
}

impl<'g> Search<'g> {
    fn visit(&mut self, node: &'g str) {
        self.on_path.insert(node);
        self.path.push(node);

        let graph = self.graph;
        for neighbor in graph.successors(node) {
            if self.on_path.contains(neighbor) {
                self.record_cycle(neighbor);
            } else if !self.visited.contains(neighbor) {
                self.visit(neighbor);
            }
        }

        self.path.pop();
        self.on_path.remove(node);
        self.visited.insert(node);
    }

    fn record_cycle(&mut self, start: &'g str) {
        let Some(pos) = self.path.iter().position(|&p| p == start) else {
            return;
        };

        let cycle = self.path[pos..].to_vec();
        let mut key = cycle.clone();
        key.sort_unstable();

        if self.seen_sets.insert(key) {
            self.found.push(cycle);
        }
    }
}

/// Finds the elementary import cycles of `graph`.
pub fn find_cycles(graph: &ModuleGraph) -> Cycles {
    let mut search = Search {
        graph,
        visited: HashSet::new(),
        on_path: HashSet::new(),
        path: Vec::new(),
        found: Vec::new(),
        seen_sets: HashSet::new(),
    };

    for path in graph.paths() {
        if !search.visited.contains(path) {
            search.visit(path);
        }
    }

    let cycle_files: Vec<Vec<String>> = search
        .found
        .iter()
        .map(|cycle| cycle.iter().map(|p| p.to_string()).collect())
        .collect();
    let cycles = search
        .found
        .iter()
        .map(|cycle| cycle.iter().map(|p| basename(p).to_string()).collect())
        .collect();

    Cycles {
        cycle_files,
        cycles,
    }
}

/// Formats a cycle as `a -> b -> a`.
pub fn cycle_path(cycle: &[String]) -> String {
    match cycle.first() {
        Some(first) => format!("{} -> {}", cycle.join(" -> "), first),
        None => String::new(),
    }
}
