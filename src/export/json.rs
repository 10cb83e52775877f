//! JSON export implementation.
//!
//! Exports the full analysis result plus a summary for machine-readable output.

use super::{ExportData, Exporter};
use crate::analysis::{cycle_path, AnalysisResult};
use crate::tasks::RefactoringTask;
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    files: usize,
    dependencies: usize,
    exported_symbols: usize,
    dead_symbols: usize,
    dead_files: usize,
    circular_dependencies: usize,
    parse_failures: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    project: &'a str,
    summary: JsonSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cycle_paths: Vec<String>,
    analysis: &'a AnalysisResult,
    tasks: &'a [RefactoringTask],
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let result = &data.result;

        let export = JsonExport {
            project: &data.project_name,
            summary: JsonSummary {
                files: data.file_count,
                dependencies: result.dependencies.len(),
                exported_symbols: data.exported_symbol_count(),
                dead_symbols: result.dead_code_symbols.len(),
                dead_files: result.dead_code_files.len(),
                circular_dependencies: result.circular_dependencies.len(),
                parse_failures: result.parse_failures.len(),
            },
            cycle_paths: result
                .circular_dependency_files
                .iter()
                .map(|cycle| cycle_path(cycle))
                .collect(),
            analysis: result,
            tasks: &data.tasks,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
