//! Per-file refactoring suggestions.

use tracing::debug;

use super::{RefactoringTask, TaskType};
use crate::analysis::AnalysisResult;
use crate::config::AnalyzerConfig;

pub const REVIEW_ABSTRACTION_PREFIX: &str = "REVIEW_ABSTRACTION";
pub const SPLIT_UTILITIES_PREFIX: &str = "SPLIT_UTILITIES";

/// Suggestions for one selected file.
///
/// - in-degree above `review_abstraction_in_degree`: review-abstraction
/// - exports above `split_utilities_exports`: split-utilities
///
/// Returns nothing when no analysis has run yet or the file has no metrics.
///
/// # Example
///
/// ```
/// use modscope::analysis::run_full_analysis;
/// use modscope::config::AnalyzerConfig;
/// use modscope::snapshot::Snapshot;
/// use modscope::tasks::dynamic_tasks;
///
/// let config = AnalyzerConfig::default();
/// assert!(dynamic_tasks(None, "src/api/client.ts", &config).is_empty());
///
/// let result = run_full_analysis(&Snapshot::seed(), &config).unwrap();
/// // client.ts has in-degree 3: at the threshold, not above it
/// assert!(dynamic_tasks(Some(&result), "src/api/client.ts", &config).is_empty());
/// ```
pub fn dynamic_tasks(
    result: Option<&AnalysisResult>,
    path: &str,
    config: &AnalyzerConfig,
) -> Vec<RefactoringTask> {
    let Some(metrics) = result.and_then(|r| r.metrics_for(path)) else {
        debug!(path, "No modularity metrics for selected file");
        return Vec::new();
    };

    let mut tasks = Vec::new();

    if metrics.in_degree > config.review_abstraction_in_degree {
        tasks.push(RefactoringTask::keyed(
            format!("{REVIEW_ABSTRACTION_PREFIX}::{path}"),
            TaskType::ReviewAbstraction,
            "task_review_abstraction",
            3,
            vec![path.to_string()],
        ));
    }

    if metrics.exports > config.split_utilities_exports {
        tasks.push(RefactoringTask::keyed(
            format!("{SPLIT_UTILITIES_PREFIX}::{path}"),
            TaskType::SplitUtilities,
            "task_split_utils",
            3,
            vec![path.to_string()],
        ));
    }

    tasks
}
