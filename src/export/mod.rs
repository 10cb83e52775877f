//! Export functionality for analysis results.
//!
//! This module provides exporters for writing an analysis and the
//! refactoring tasks it triggers in JSON or Markdown.

pub mod json;
pub mod markdown;

use std::io::{self, Write};

use crate::analysis::AnalysisResult;
use crate::config::AnalyzerConfig;
use crate::tasks::{static_tasks, RefactoringTask};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    Json,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Everything an exporter writes.
#[derive(Debug, Clone)]
pub struct ExportData {
    /// Directory name, or "seed" for the built-in codebase
    pub project_name: String,
    pub file_count: usize,
    pub result: AnalysisResult,
    pub tasks: Vec<RefactoringTask>,
}

impl ExportData {
    /// Bundles a result with the static tasks it triggers.
    pub fn new(
        project_name: impl Into<String>,
        file_count: usize,
        result: AnalysisResult,
        config: &AnalyzerConfig,
    ) -> Self {
        let tasks = static_tasks(&result, config);
        Self {
            project_name: project_name.into(),
            file_count,
            result,
            tasks,
        }
    }

    pub fn exported_symbol_count(&self) -> usize {
        self.result.symbols.values().map(Vec::len).sum()
    }

    /// Files ordered by heat, hottest first. Ties keep snapshot order.
    pub fn files_by_heat(&self) -> Vec<(&str, f64)> {
        let mut files: Vec<(&str, f64)> = self
            .result
            .heat_scores
            .iter()
            .map(|(path, heat)| (path.as_str(), *heat))
            .collect();
        files.sort_by(|a, b| b.1.total_cmp(&a.1));
        files
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
pub(crate) fn seed_data() -> ExportData {
    use crate::analysis::run_full_analysis;
    use crate::snapshot::Snapshot;

    let config = AnalyzerConfig::default();
    let snapshot = Snapshot::seed();
    let result = run_full_analysis(&snapshot, &config).unwrap();
    ExportData::new("seed", snapshot.len(), result, &config)
}
