//! Markdown export implementation.
//!
//! Exports analysis results in Markdown format for documentation and reporting.

use super::{ExportData, Exporter};
use crate::analysis::cycle_path;
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let result = &data.result;

        writeln!(writer, "# Modularity Report")?;
        writeln!(writer)?;
        writeln!(writer, "**Project:** {}", data.project_name)?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Files | {} |", data.file_count)?;
        writeln!(writer, "| Import Edges | {} |", result.dependencies.len())?;
        writeln!(
            writer,
            "| Exported Symbols | {} |",
            data.exported_symbol_count()
        )?;
        writeln!(
            writer,
            "| Dead Symbols | {} |",
            result.dead_code_symbols.len()
        )?;
        writeln!(writer, "| Dead Files | {} |", result.dead_code_files.len())?;
        writeln!(
            writer,
            "| Circular Dependencies | {} |",
            result.circular_dependencies.len()
        )?;
        if !result.parse_failures.is_empty() {
            writeln!(
                writer,
                "| Parse Failures | {} |",
                result.parse_failures.len()
            )?;
        }
        writeln!(writer)?;

        // Hottest files first
        writeln!(writer, "## Modularity")?;
        writeln!(writer)?;
        writeln!(writer, "| File | In | Out | Exports | Heat |")?;
        writeln!(writer, "|------|----|-----|---------|------|")?;
        for (path, heat) in data.files_by_heat() {
            let metrics = result.metrics_for(path).copied().unwrap_or_default();
            writeln!(
                writer,
                "| {} | {} | {} | {} | {:.2} |",
                path, metrics.in_degree, metrics.out_degree, metrics.exports, heat
            )?;
        }
        writeln!(writer)?;

        let has_issues = result.has_cycles()
            || !result.dead_code_symbols.is_empty()
            || !result.parse_failures.is_empty();
        if has_issues {
            writeln!(writer, "## Issues")?;
            writeln!(writer)?;
        }

        if result.has_cycles() {
            writeln!(writer, "### Circular Dependencies")?;
            writeln!(writer)?;
            for (i, cycle) in result.circular_dependency_files.iter().enumerate() {
                writeln!(writer, "{}. `{}`", i + 1, cycle_path(cycle))?;
            }
            writeln!(writer)?;
        }

        if !result.dead_code_symbols.is_empty() {
            writeln!(writer, "### Dead Code")?;
            writeln!(writer)?;
            if !result.dead_code_files.is_empty() {
                writeln!(writer, "Files with no used exports:")?;
                writeln!(writer)?;
                for path in &result.dead_code_files {
                    writeln!(writer, "- `{}`", path)?;
                }
                writeln!(writer)?;
            }
            writeln!(writer, "| File | Symbol |")?;
            writeln!(writer, "|------|--------|")?;
            for dead in &result.dead_code_symbols {
                writeln!(writer, "| {} | `{}` |", dead.path, dead.symbol_name)?;
            }
            writeln!(writer)?;
        }

        if !result.parse_failures.is_empty() {
            writeln!(writer, "### Parse Failures")?;
            writeln!(writer)?;
            for failure in &result.parse_failures {
                writeln!(writer, "- `{}`: {}", failure.path, failure.message)?;
            }
            writeln!(writer)?;
        }

        if !data.tasks.is_empty() {
            writeln!(writer, "## Refactoring Tasks")?;
            writeln!(writer)?;
            for task in &data.tasks {
                writeln!(writer, "### {} ({})", task.id, task.task_type)?;
                writeln!(writer)?;
                writeln!(writer, "Files: {}", task.files_involved.join(", "))?;
                writeln!(writer)?;
                for (i, step) in task.plan_keys.iter().enumerate() {
                    writeln!(writer, "{}. {}", i + 1, step)?;
                }
                writeln!(writer)?;
            }
        }

        // Footer
        writeln!(writer, "---")?;
        writeln!(writer, "*Generated by modscope*")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_full_analysis;
    use crate::config::AnalyzerConfig;
    use crate::export::seed_data;
    use crate::snapshot::{FileRecord, Snapshot};

    fn render(data: &ExportData) -> String {
        let mut output = Vec::new();
        MarkdownExporter.export(data, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn clean_data() -> ExportData {
        let config = AnalyzerConfig::default();
        let snapshot = Snapshot::new(vec![
            FileRecord::new("src/a.ts", "import { b } from './b';\n"),
            FileRecord::new("src/b.ts", "export const b = 1;\n"),
        ])
        .unwrap();
        let result = run_full_analysis(&snapshot, &config).unwrap();
        ExportData::new("clean", snapshot.len(), result, &config)
    }

    #[test]
    fn test_markdown_export_summary() {
        let md = render(&seed_data());

        assert!(md.contains("# Modularity Report"));
        assert!(md.contains("**Project:** seed"));
        assert!(md.contains("| Files | 6 |"));
        assert!(md.contains("| Import Edges | 6 |"));
        assert!(md.contains("| Dead Files | 3 |"));
        assert!(!md.contains("| Parse Failures"));
    }

    #[test]
    fn test_markdown_export_modularity_table() {
        let md = render(&seed_data());

        assert!(md.contains("| src/api/client.ts | 3 | 1 | 1 |"));
        let client = md.find("| src/api/client.ts |").unwrap();
        let legacy = md.find("| src/legacy/old-utils.ts |").unwrap();
        assert!(client < legacy);
    }

    #[test]
    fn test_markdown_export_issues() {
        let md = render(&seed_data());

        assert!(md.contains("## Issues"));
        assert!(md.contains(
            "1. `src/api/client.ts -> src/services/auth.ts -> src/api/client.ts`"
        ));
        assert!(md.contains("- `src/legacy/old-utils.ts`"));
        assert!(md.contains("| src/services/auth.ts | `setAuthToken` |"));
    }

    #[test]
    fn test_markdown_export_tasks() {
        let md = render(&seed_data());

        assert!(md.contains("### CIRCULAR_DEP_AUTH_CLIENT (BREAK_CIRCULAR_DEPENDENCY)"));
        assert!(md.contains("Files: src/legacy/old-utils.ts"));
    }

    #[test]
    fn test_markdown_export_no_issues_section_when_clean() {
        let md = render(&clean_data());

        assert!(!md.contains("## Issues"));
        assert!(!md.contains("## Refactoring Tasks"));
        assert!(md.contains("*Generated by modscope*"));
    }
}
