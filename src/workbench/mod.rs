//! Session driver tying the snapshot, analysis, tasks and bus together.
//!
//! A [`Workbench`] owns the current snapshot and its latest analysis. Every
//! user-facing action goes through it, publishes the matching bus event, and
//! leaves the analysis consistent with the snapshot it holds.

use std::rc::Rc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::analysis::{run_full_analysis, AnalysisError, AnalysisResult};
use crate::bus::{BusError, Event, EventBus};
use crate::config::AnalyzerConfig;
use crate::snapshot::Snapshot;
use crate::tasks::{dynamic_tasks, static_tasks, ApplyError, RefactoringTask, TaskApplier};

#[derive(Debug, Error)]
pub enum WorkbenchError {
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("File not in snapshot: {0}")]
    UnknownFile(String),

    #[error("Task already completed: {0}")]
    TaskCompleted(String),

    #[error("No analysis has been run")]
    NotAnalyzed,

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Bus(#[from] BusError),

    #[error(transparent)]
    Apply(#[from] ApplyError),
}

pub type WorkbenchResult<T> = Result<T, WorkbenchError>;

/// Files that would be touched by a task: its own files plus their direct
/// importers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactReport {
    pub source: Vec<String>,
    pub affected: Vec<String>,
}

pub struct Workbench {
    snapshot: Snapshot,
    config: AnalyzerConfig,
    result: Option<AnalysisResult>,
    static_tasks: Vec<RefactoringTask>,
    dynamic_tasks: Vec<RefactoringTask>,
    completed: Vec<String>,
    selected: Option<String>,
    bus: Rc<dyn EventBus>,
    applier: Box<dyn TaskApplier>,
}

impl Workbench {
    /// Nothing is analyzed until [`Workbench::run_analysis`].
    pub fn new(
        snapshot: Snapshot,
        config: AnalyzerConfig,
        bus: Rc<dyn EventBus>,
        applier: Box<dyn TaskApplier>,
    ) -> Self {
        Self {
            snapshot,
            config,
            result: None,
            static_tasks: Vec::new(),
            dynamic_tasks: Vec::new(),
            completed: Vec::new(),
            selected: None,
            bus,
            applier,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn static_tasks(&self) -> &[RefactoringTask] {
        &self.static_tasks
    }

    pub fn dynamic_tasks(&self) -> &[RefactoringTask] {
        &self.dynamic_tasks
    }

    pub fn completed_tasks(&self) -> &[String] {
        &self.completed
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_completed(&self, task_id: &str) -> bool {
        self.completed.iter().any(|id| id == task_id)
    }

    /// Static tasks followed by the selected file's dynamic tasks.
    pub fn all_tasks(&self) -> Vec<&RefactoringTask> {
        self.static_tasks
            .iter()
            .chain(self.dynamic_tasks.iter())
            .collect()
    }

    pub fn find_task(&self, task_id: &str) -> Option<&RefactoringTask> {
        self.all_tasks().into_iter().find(|t| t.id == task_id)
    }

    /// Re-analyzes the current snapshot and rebuilds the static tasks.
    /// Completed ids no longer offered are forgotten.
    #[instrument(skip(self), fields(files = self.snapshot.len()))]
    pub fn run_analysis(&mut self) -> WorkbenchResult<&AnalysisResult> {
        let result = run_full_analysis(&self.snapshot, &self.config)?;
        let tasks = static_tasks(&result, &self.config);

        self.completed
            .retain(|id| tasks.iter().any(|task| &task.id == id));
        self.static_tasks = tasks;

        if let Some(path) = self.selected.take() {
            if self.snapshot.contains(&path) {
                self.dynamic_tasks = dynamic_tasks(Some(&result), &path, &self.config);
                self.selected = Some(path);
            } else {
                debug!(path = %path, "Selected file left the snapshot");
                self.dynamic_tasks.clear();
            }
        }

        info!(
            static_tasks = self.static_tasks.len(),
            completed = self.completed.len(),
            "Analysis refreshed"
        );
        Ok(self.result.insert(result))
    }

    /// Selects a file and replaces the dynamic tasks with the ones it
    /// triggers.
    pub fn select_file(&mut self, path: &str) -> WorkbenchResult<&[RefactoringTask]> {
        let file = self
            .snapshot
            .get(path)
            .ok_or_else(|| WorkbenchError::UnknownFile(path.to_string()))?;
        self.bus.publish(Event::NodeSelected(file.clone()))?;

        self.dynamic_tasks = dynamic_tasks(self.result.as_ref(), path, &self.config);
        self.selected = Some(path.to_string());
        debug!(path, tasks = self.dynamic_tasks.len(), "File selected");
        Ok(&self.dynamic_tasks)
    }

    /// Runs a task through the applier, swaps in the new snapshot and
    /// re-analyzes it.
    #[instrument(skip(self))]
    pub fn execute_task(&mut self, task_id: &str) -> WorkbenchResult<&AnalysisResult> {
        let task = self
            .find_task(task_id)
            .cloned()
            .ok_or_else(|| WorkbenchError::UnknownTask(task_id.to_string()))?;
        if self.is_completed(task_id) {
            return Err(WorkbenchError::TaskCompleted(task_id.to_string()));
        }

        self.bus.publish(Event::ExecuteRefactoring(task.clone()))?;
        let next = self.applier.apply(&self.snapshot, &task)?;
        self.bus.publish(Event::RefactoringComplete {
            task_id: task.id.clone(),
            snapshot: next.clone(),
        })?;

        self.snapshot = next;
        self.completed.push(task.id);
        self.run_analysis()
    }

    /// Publishes a simulate-impact event and reports the task's files and
    /// their direct importers.
    pub fn simulate_impact(&self, task_id: &str) -> WorkbenchResult<ImpactReport> {
        let task = self
            .find_task(task_id)
            .ok_or_else(|| WorkbenchError::UnknownTask(task_id.to_string()))?;
        let result = self.result.as_ref().ok_or(WorkbenchError::NotAnalyzed)?;

        self.bus.publish(Event::SimulateImpact(task.clone()))?;

        Ok(ImpactReport {
            source: task.files_involved.clone(),
            affected: result.impacted_by(&task.files_involved),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{EventKind, Intent, LocalBus};
    use crate::snapshot::FileRecord;
    use crate::tasks::{IdentityApplier, CIRCULAR_DEP_TASK_ID, DEAD_CODE_TASK_ID};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    /// Drops auth.ts's import of the client.
    struct BreakAuthCycle;

    impl TaskApplier for BreakAuthCycle {
        fn apply(
            &self,
            snapshot: &Snapshot,
            _task: &RefactoringTask,
        ) -> Result<Snapshot, ApplyError> {
            Ok(snapshot.with_file(FileRecord::new(
                "src/services/auth.ts",
                "export function getAuthToken() { return ''; }\n\
                 export function setAuthToken(token) {}\n",
            )))
        }
    }

    struct Refuse;

    impl TaskApplier for Refuse {
        fn apply(
            &self,
            _snapshot: &Snapshot,
            task: &RefactoringTask,
        ) -> Result<Snapshot, ApplyError> {
            Err(ApplyError::Rejected {
                task_id: task.id.clone(),
                reason: "read-only".to_string(),
            })
        }
    }

    fn workbench(bus: Rc<LocalBus>, applier: Box<dyn TaskApplier>) -> Workbench {
        let mut wb = Workbench::new(Snapshot::seed(), AnalyzerConfig::default(), bus, applier);
        wb.run_analysis().unwrap();
        wb
    }

    fn record(bus: &LocalBus, kind: EventKind) -> Rc<RefCell<Vec<Intent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe(
            kind,
            Box::new(move |envelope| {
                sink.borrow_mut().push(envelope.intent().clone());
                Ok(())
            }),
        );
        seen
    }

    #[test]
    fn test_analysis_offers_static_tasks() {
        let wb = workbench(Rc::new(LocalBus::new()), Box::new(IdentityApplier));

        let ids: Vec<&str> = wb.all_tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![CIRCULAR_DEP_TASK_ID, DEAD_CODE_TASK_ID]);
        assert!(wb.result().is_some());
    }

    #[test]
    fn test_select_file_publishes_and_sets_dynamic_tasks() {
        let bus = Rc::new(LocalBus::new());
        let selections = record(&bus, EventKind::NodeSelected);
        let mut wb = workbench(Rc::clone(&bus), Box::new(IdentityApplier));

        let tasks = wb.select_file("src/api/client.ts").unwrap();
        assert!(tasks.is_empty());
        assert_eq!(wb.selected(), Some("src/api/client.ts"));
        assert_eq!(selections.borrow().len(), 1);
        assert_eq!(selections.borrow()[0].target_id(), "src/api/client.ts");
    }

    #[test]
    fn test_select_unknown_file() {
        let mut wb = workbench(Rc::new(LocalBus::new()), Box::new(IdentityApplier));
        let err = wb.select_file("src/missing.ts").unwrap_err();
        assert!(matches!(err, WorkbenchError::UnknownFile(_)));
    }

    #[test]
    fn test_execute_swaps_snapshot_and_prunes_completed() {
        let bus = Rc::new(LocalBus::new());
        let executed = record(&bus, EventKind::ExecuteRefactoringProtocol);
        let finished = record(&bus, EventKind::RefactoringComplete);
        let mut wb = workbench(Rc::clone(&bus), Box::new(BreakAuthCycle));

        let result = wb.execute_task(CIRCULAR_DEP_TASK_ID).unwrap();
        assert!(!result.has_cycles());

        assert_eq!(executed.borrow().len(), 1);
        assert_eq!(finished.borrow().len(), 1);
        assert!(matches!(
            finished.borrow()[0],
            Intent::UpdateSnapshot { .. }
        ));

        // The cycle task is no longer offered, so its completion is dropped
        let ids: Vec<&str> = wb.all_tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![DEAD_CODE_TASK_ID]);
        assert!(wb.completed_tasks().is_empty());
    }

    #[test]
    fn test_completed_task_still_offered_is_kept() {
        let mut wb = workbench(Rc::new(LocalBus::new()), Box::new(IdentityApplier));

        wb.execute_task(DEAD_CODE_TASK_ID).unwrap();
        assert!(wb.is_completed(DEAD_CODE_TASK_ID));

        let err = wb.execute_task(DEAD_CODE_TASK_ID).unwrap_err();
        assert!(matches!(err, WorkbenchError::TaskCompleted(_)));
    }

    #[test]
    fn test_rejected_apply_leaves_state_alone() {
        let bus = Rc::new(LocalBus::new());
        let finished = record(&bus, EventKind::RefactoringComplete);
        let mut wb = workbench(Rc::clone(&bus), Box::new(Refuse));

        let err = wb.execute_task(CIRCULAR_DEP_TASK_ID).unwrap_err();
        assert!(matches!(err, WorkbenchError::Apply(_)));
        assert!(finished.borrow().is_empty());
        assert!(wb.completed_tasks().is_empty());
        assert!(wb.result().map(|r| r.has_cycles()).unwrap_or(false));
    }

    #[test]
    fn test_unknown_task() {
        let mut wb = workbench(Rc::new(LocalBus::new()), Box::new(IdentityApplier));
        assert!(matches!(
            wb.execute_task("NOPE"),
            Err(WorkbenchError::UnknownTask(_))
        ));
        assert!(matches!(
            wb.simulate_impact("NOPE"),
            Err(WorkbenchError::UnknownTask(_))
        ));
    }

    #[test]
    fn test_simulate_impact() {
        let bus = Rc::new(LocalBus::new());
        let simulated = record(&bus, EventKind::SimulateImpact);
        let wb = workbench(Rc::clone(&bus), Box::new(IdentityApplier));

        let report = wb.simulate_impact(CIRCULAR_DEP_TASK_ID).unwrap();
        assert_eq!(
            report.source,
            vec!["src/api/client.ts", "src/services/auth.ts"]
        );
        assert_eq!(
            report.affected,
            vec![
                "src/api/client.ts",
                "src/services/auth.ts",
                "src/components/UserProfile.tsx",
                "src/components/Settings.tsx",
            ]
        );
        assert_eq!(simulated.borrow().len(), 1);
    }

    #[test]
    fn test_simulate_before_analysis() {
        let wb = Workbench::new(
            Snapshot::seed(),
            AnalyzerConfig::default(),
            Rc::new(LocalBus::new()),
            Box::new(IdentityApplier),
        );
        assert!(matches!(
            wb.simulate_impact(CIRCULAR_DEP_TASK_ID),
            Err(WorkbenchError::UnknownTask(_))
        ));
    }
}
