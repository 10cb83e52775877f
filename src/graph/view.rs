//! Render-ready graph data for dependency visualizations.

use serde::Serialize;

/// A file node with its analysis flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub is_dead: bool,
    pub is_circular: bool,
    pub heat: f64,
}

/// One import edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}
