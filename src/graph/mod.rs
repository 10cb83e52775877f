//! Graph module for import relationship modeling.
//!
//! [`ModuleGraph`] holds the directed file-to-file import graph the cycle
//! detector and modularity scorer run over; [`GraphView`] is the flattened
//! form handed to visualizations.
//!
//! # Example
//!
//! ```rust
//! use modscope::analysis::imports::Dependency;
//! use modscope::graph::ModuleGraph;
//!
//! let graph = ModuleGraph::from_dependencies(
//!     ["src/a.ts", "src/b.ts"],
//!     &[Dependency::new("src/a.ts", "src/b.ts")],
//! );
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

mod module_graph;
mod view;

pub use module_graph::{ModuleGraph, ModuleNode};
pub use view::{GraphLink, GraphNode, GraphView};
