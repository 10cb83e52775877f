//! The fixed, analysis-triggered task catalogue.

use super::{RefactoringTask, TaskType};
use crate::analysis::AnalysisResult;
use crate::config::AnalyzerConfig;

pub const CIRCULAR_DEP_TASK_ID: &str = "CIRCULAR_DEP_AUTH_CLIENT";
pub const DEAD_CODE_TASK_ID: &str = "DEAD_CODE_OLD_UTILS";

/// Static tasks for a full analysis result.
///
/// - Any cycle: break-circular-dependency over every cycle file.
/// - The configured legacy file is dead: remove-dead-code for that file.
pub fn static_tasks(result: &AnalysisResult, config: &AnalyzerConfig) -> Vec<RefactoringTask> {
    let mut tasks = Vec::new();

    if !result.circular_dependencies.is_empty() {
        let files = result
            .circular_dependency_files
            .iter()
            .flatten()
            .cloned()
            .collect();
        tasks.push(RefactoringTask::keyed(
            CIRCULAR_DEP_TASK_ID,
            TaskType::BreakCircularDependency,
            "task_circ_dep",
            4,
            files,
        ));
    }

    if result.is_dead_file(&config.legacy_file) {
        tasks.push(RefactoringTask::keyed(
            DEAD_CODE_TASK_ID,
            TaskType::RemoveDeadCode,
            "task_dead_code",
            3,
            vec![config.legacy_file.clone()],
        ));
    }

    tasks
}
