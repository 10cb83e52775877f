//! The aggregate output of one full analysis pass.

use indexmap::IndexMap;
use serde::Serialize;

use super::dead_code::DeadSymbol;
use super::imports::Dependency;
use super::modularity::ModularityMetrics;
use super::symbols::{Symbol, SymbolTable};
use crate::graph::{GraphLink, GraphNode, GraphView};
use crate::parser::ParseFailure;
use crate::snapshot::Snapshot;

/// Immutable analysis snapshot. A new pass replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub dependencies: Vec<Dependency>,
    pub symbols: SymbolTable,
    pub dead_code_symbols: Vec<DeadSymbol>,
    pub dead_code_files: Vec<String>,
    /// Cycles as basename labels.
    pub circular_dependencies: Vec<Vec<String>>,
    /// Cycles as full paths.
    pub circular_dependency_files: Vec<Vec<String>>,
    pub modularity_metrics: IndexMap<String, ModularityMetrics>,
    pub heat_scores: IndexMap<String, f64>,
    pub parse_failures: Vec<ParseFailure>,
}

impl AnalysisResult {
    pub fn is_dead_file(&self, path: &str) -> bool {
        self.dead_code_files.iter().any(|f| f == path)
    }

    pub fn is_circular_file(&self, path: &str) -> bool {
        self.circular_dependency_files
            .iter()
            .any(|cycle| cycle.iter().any(|f| f == path))
    }

    pub fn has_cycles(&self) -> bool {
        !self.circular_dependency_files.is_empty()
    }

    /// Heat score of `path`, 0 for unknown files.
    pub fn heat_score(&self, path: &str) -> f64 {
        self.heat_scores.get(path).copied().unwrap_or(0.0)
    }

    pub fn metrics_for(&self, path: &str) -> Option<&ModularityMetrics> {
        self.modularity_metrics.get(path)
    }

    pub fn symbols_in(&self, path: &str) -> &[Symbol] {
        self.symbols.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn dead_symbols_in<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a DeadSymbol> {
        self.dead_code_symbols.iter().filter(move |d| d.path == path)
    }

    /// Every path that appears in at least one cycle, first-seen order.
    pub fn circular_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = Vec::new();
        for path in self.circular_dependency_files.iter().flatten() {
            if !files.contains(&path.as_str()) {
                files.push(path);
            }
        }
        files
    }

    /// Files importing any of `targets` directly, deduplicated in
    /// first-seen order.
    pub fn impacted_by(&self, targets: &[String]) -> Vec<String> {
        let mut affected: Vec<String> = Vec::new();
        for dep in &self.dependencies {
            if targets.contains(&dep.to) && !affected.contains(&dep.from) {
                affected.push(dep.from.clone());
            }
        }
        affected
    }

    /// Nodes for every snapshot file plus one link per dependency edge.
    pub fn graph_view(&self, snapshot: &Snapshot) -> GraphView {
        let nodes = snapshot
            .iter()
            .map(|file| GraphNode {
                id: file.path.clone(),
                is_dead: self.is_dead_file(&file.path),
                is_circular: self.is_circular_file(&file.path),
                heat: self.heat_score(&file.path),
            })
            .collect();
        let links = self
            .dependencies
            .iter()
            .map(|dep| GraphLink {
                source: dep.from.clone(),
                target: dep.to.clone(),
            })
            .collect();

        GraphView { nodes, links }
    }
}
