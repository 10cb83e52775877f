//! modscope - static modularity analysis for TypeScript/JavaScript snapshots
//!
//! A [`snapshot::Snapshot`] of source files goes through one pure pipeline
//! ([`analysis::run_full_analysis`]): parse, extract exported symbols and
//! import edges, count cross-file usages, then derive dead code, import
//! cycles and per-file coupling heat. [`tasks`] turns a result into
//! refactoring suggestions and [`workbench::Workbench`] drives a session,
//! announcing each action on an injected [`bus::EventBus`].

pub mod analysis;
pub mod bus;
pub mod config;
pub mod export;
pub mod graph;
pub mod parser;
pub mod snapshot;
pub mod tasks;
pub mod workbench;
