//! Static analysis of a snapshot's module structure.
//!
//! This module extracts exported symbols and relative imports from every
//! file, then derives the facts the rest of the tool consumes:
//!
//! - Dead exports: exported symbols no other file imports by name
//! - Dead files: files whose every export is dead
//! - Import cycles, deduplicated by vertex set
//! - Per-file modularity metrics and a 0-1 heat score
//!
//! # Example
//!
//! ```
//! use modscope::analysis::run_full_analysis;
//! use modscope::config::AnalyzerConfig;
//! use modscope::snapshot::Snapshot;
//!
//! let result = run_full_analysis(&Snapshot::seed(), &AnalyzerConfig::default()).unwrap();
//! for (path, heat) in &result.heat_scores {
//!     println!("{path}: {heat:.2}");
//! }
//! ```

pub mod cycles;
pub mod dead_code;
pub mod engine;
pub mod imports;
pub mod modularity;
pub mod result;
pub mod symbols;
pub mod usage;

// Re-export main types for convenience
pub use cycles::{cycle_path, find_cycles, Cycles};
pub use dead_code::{find_dead_code, DeadCode, DeadSymbol};
pub use engine::{run_full_analysis, AnalysisError, EngineResult};
pub use imports::Dependency;
pub use modularity::ModularityMetrics;
pub use result::AnalysisResult;
pub use symbols::{Symbol, SymbolKind, SymbolTable};
pub use usage::UsageCounts;
