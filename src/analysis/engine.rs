//! Full-analysis orchestration.
//!
//! Each stage is a function from explicit inputs to an explicit output
//! bundle; nothing is cached between calls.
//!
//! 1. parse every file, substituting an empty module on failure
//! 2. extract symbols, import edges and named imports per file
//! 3. build the module graph and its modularity metrics
//! 4. count symbol usages
//! 5. dead code, cycles and heat scores over the now-fixed state

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, info};

use super::cycles::find_cycles;
use super::dead_code::find_dead_code;
use super::imports::{extract_dependencies, imported_names, Dependency};
use super::modularity::{compute_metrics, heat_scores};
use super::result::AnalysisResult;
use super::symbols::{extract_symbols, SymbolTable};
use super::usage::{count_usages, ImportedNames};
use crate::config::AnalyzerConfig;
use crate::graph::ModuleGraph;
use crate::parser::{Module, ParseError, ParseFailure, ParserAdapter};
use crate::snapshot::Snapshot;

/// Errors that abort a whole analysis pass. Per-file parse failures are
/// not among them.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Parser setup failed: {0}")]
    Parser(#[from] ParseError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, AnalysisError>;

/// Parsed modules per path, in snapshot order.
#[derive(Debug, Clone, Default)]
pub struct ParsedSnapshot {
    pub modules: IndexMap<String, Module>,
    pub failures: Vec<ParseFailure>,
}

/// Per-file facts pulled out of the parsed modules.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub symbols: SymbolTable,
    pub dependencies: Vec<Dependency>,
    pub imported_names: ImportedNames,
}

/// Stage 1: parse every file.
pub fn parse_snapshot(snapshot: &Snapshot) -> EngineResult<ParsedSnapshot> {
    let mut adapter = ParserAdapter::new()?;
    let mut parsed = ParsedSnapshot::default();

    for file in snapshot {
        let (module, failure) = adapter.parse_or_empty(file);
        parsed.modules.insert(file.path.clone(), module);
        parsed.failures.extend(failure);
    }

    debug!(
        files = parsed.modules.len(),
        failures = parsed.failures.len(),
        "Parsed snapshot"
    );
    Ok(parsed)
}

/// Stage 2: symbols, resolved edges and named imports of every file.
pub fn extract(snapshot: &Snapshot, parsed: &ParsedSnapshot) -> Extraction {
    let mut extraction = Extraction::default();

    for (path, module) in &parsed.modules {
        extraction
            .symbols
            .insert(path.clone(), extract_symbols(module));
        extraction
            .dependencies
            .extend(extract_dependencies(path, module, snapshot));
        extraction
            .imported_names
            .insert(path.clone(), imported_names(module));
    }

    debug!(
        edges = extraction.dependencies.len(),
        "Extracted symbols and dependencies"
    );
    extraction
}

/// Runs every stage over `snapshot` and returns the aggregate result.
///
/// # Example
///
/// ```
/// use modscope::analysis::run_full_analysis;
/// use modscope::config::AnalyzerConfig;
/// use modscope::snapshot::Snapshot;
///
/// let result = run_full_analysis(&Snapshot::seed(), &AnalyzerConfig::default()).unwrap();
/// assert_eq!(result.circular_dependencies, vec![vec!["client.ts", "auth.ts"]]);
/// assert!(result.is_dead_file("src/legacy/old-utils.ts"));
/// ```
pub fn run_full_analysis(
    snapshot: &Snapshot,
    config: &AnalyzerConfig,
) -> EngineResult<AnalysisResult> {
    let parsed = parse_snapshot(snapshot)?;
    let Extraction {
        symbols,
        dependencies,
        imported_names,
    } = extract(snapshot, &parsed);

    let graph = ModuleGraph::from_dependencies(
        snapshot.iter().map(|f| f.path.as_str()),
        &dependencies,
    );
    let modularity_metrics = compute_metrics(&graph, &symbols);
    let usages = count_usages(&imported_names, &symbols);

    let dead = find_dead_code(&symbols, &usages);
    let cycles = find_cycles(&graph);
    let heat = heat_scores(&modularity_metrics, &config.heat_weights);

    info!(
        files = snapshot.len(),
        edges = dependencies.len(),
        dead_symbols = dead.symbols.len(),
        dead_files = dead.files.len(),
        cycles = cycles.cycle_files.len(),
        parse_failures = parsed.failures.len(),
        "Analysis complete"
    );

    Ok(AnalysisResult {
        dependencies,
        symbols,
        dead_code_symbols: dead.symbols,
        dead_code_files: dead.files,
        circular_dependencies: cycles.cycles,
        circular_dependency_files: cycles.cycle_files,
        modularity_metrics,
        heat_scores: heat,
        parse_failures: parsed.failures,
    })
}
