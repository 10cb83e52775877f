//! Modularity metrics and heat scoring.
//!
//! Heat combines a file's in-degree, out-degree and export count, each
//! normalized by the largest value seen in the snapshot (floored at 1):
//!
//! `heat = 0.45 * in + 0.35 * out + 0.20 * exports`, capped at 1.0.

use indexmap::IndexMap;
use serde::Serialize;

use super::symbols::SymbolTable;
use crate::config::HeatWeights;
use crate::graph::ModuleGraph;

/// Coupling and surface metrics of one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModularityMetrics {
    pub in_degree: usize,
    pub out_degree: usize,
    pub exports: usize,
}

/// Metrics per path, in graph (snapshot) order.
pub fn compute_metrics(
    graph: &ModuleGraph,
    symbols: &SymbolTable,
) -> IndexMap<String, ModularityMetrics> {
    graph
        .paths()
        .into_iter()
        .map(|path| {
            let exports = symbols
                .get(path)
                .map(|s| s.iter().filter(|s| s.exported).count())
                .unwrap_or(0);
            let metrics = ModularityMetrics {
                in_degree: graph.in_degree(path),
                out_degree: graph.out_degree(path),
                exports,
            };
            (path.to_string(), metrics)
        })
        .collect()
}

/// Heat score in `[0, 1]` per path.
pub fn heat_scores(
    metrics: &IndexMap<String, ModularityMetrics>,
    weights: &HeatWeights,
) -> IndexMap<String, f64> {
    let max_of = |f: fn(&ModularityMetrics) -> usize| {
        metrics.values().map(f).max().unwrap_or(0).max(1) as f64
    };
    let max_in = max_of(|m| m.in_degree);
    let max_out = max_of(|m| m.out_degree);
    let max_exports = max_of(|m| m.exports);

    metrics
        .iter()
        .map(|(path, m)| {
            let heat = weights.in_degree * (m.in_degree as f64 / max_in)
                + weights.out_degree * (m.out_degree as f64 / max_out)
                + weights.exports * (m.exports as f64 / max_exports);
            (path.clone(), heat.min(1.0))
        })
        .collect()
}
