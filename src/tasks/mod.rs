//! Refactoring tasks.
//!
//! Two sources of tasks exist:
//!
//! - The static catalogue ([`static_tasks`]), rebuilt after every full
//!   analysis from global findings.
//! - Dynamic suggestions ([`dynamic_tasks`]), rebuilt on every file selection
//!   from that one file's modularity metrics.
//!
//! Tasks carry localization keys rather than text; the UI resolves them.
//! Executing a task is delegated to a [`TaskApplier`].

mod applier;
mod catalogue;
mod dynamic;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use applier::{ApplyError, IdentityApplier, TaskApplier};
pub use catalogue::{static_tasks, CIRCULAR_DEP_TASK_ID, DEAD_CODE_TASK_ID};
pub use dynamic::{dynamic_tasks, REVIEW_ABSTRACTION_PREFIX, SPLIT_UTILITIES_PREFIX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    BreakCircularDependency,
    RemoveDeadCode,
    SplitUtilities,
    ReviewAbstraction,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BreakCircularDependency => write!(f, "BREAK_CIRCULAR_DEPENDENCY"),
            Self::RemoveDeadCode => write!(f, "REMOVE_DEAD_CODE"),
            Self::SplitUtilities => write!(f, "SPLIT_UTILITIES"),
            Self::ReviewAbstraction => write!(f, "REVIEW_ABSTRACTION"),
        }
    }
}

/// A proposed refactoring. Never mutated; a new analysis replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefactoringTask {
    pub id: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub title_key: String,
    pub description_key: String,
    pub files_involved: Vec<String>,
    pub plan_keys: Vec<String>,
}

impl RefactoringTask {
    /// Builds a task whose keys share `key_prefix`: `<prefix>_title`,
    /// `<prefix>_desc` and `<prefix>_plan_1..=plan_steps`.
    pub(crate) fn keyed(
        id: impl Into<String>,
        task_type: TaskType,
        key_prefix: &str,
        plan_steps: usize,
        files_involved: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            task_type,
            title_key: format!("{key_prefix}_title"),
            description_key: format!("{key_prefix}_desc"),
            files_involved,
            plan_keys: (1..=plan_steps)
                .map(|i| format!("{key_prefix}_plan_{i}"))
                .collect(),
        }
    }
}
