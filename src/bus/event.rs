//! Bus events and the intents they are reduced to.

use serde::Serialize;

use super::{BusError, BusResult};
use crate::snapshot::{FileRecord, Snapshot};
use crate::tasks::{RefactoringTask, TaskType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    ExecuteRefactoringProtocol,
    SimulateImpact,
    RefactoringComplete,
    NodeSelected,
    WisdomFetchStart,
    WisdomFetchEnd,
}

/// A raw event as handed to [`super::EventBus::publish`].
#[derive(Debug, Clone)]
pub enum Event {
    ExecuteRefactoring(RefactoringTask),
    SimulateImpact(RefactoringTask),
    RefactoringComplete { task_id: String, snapshot: Snapshot },
    NodeSelected(FileRecord),
    WisdomFetchStart,
    WisdomFetchEnd,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ExecuteRefactoring(_) => EventKind::ExecuteRefactoringProtocol,
            Self::SimulateImpact(_) => EventKind::SimulateImpact,
            Self::RefactoringComplete { .. } => EventKind::RefactoringComplete,
            Self::NodeSelected(_) => EventKind::NodeSelected,
            Self::WisdomFetchStart => EventKind::WisdomFetchStart,
            Self::WisdomFetchEnd => EventKind::WisdomFetchEnd,
        }
    }

    pub(super) fn validate(&self) -> BusResult<()> {
        let invalid = |reason: &str| {
            Err(BusError::InvalidPayload {
                kind: self.kind(),
                reason: reason.to_string(),
            })
        };

        match self {
            Self::ExecuteRefactoring(task) | Self::SimulateImpact(task) => {
                if task.id.is_empty() {
                    return invalid("task id is empty");
                }
                if task.files_involved.iter().any(String::is_empty) {
                    return invalid("task lists an empty file path");
                }
                Ok(())
            }
            Self::RefactoringComplete { task_id, .. } if task_id.is_empty() => {
                invalid("completed task id is empty")
            }
            Self::NodeSelected(file) if file.path.is_empty() => invalid("selected path is empty"),
            _ => Ok(()),
        }
    }

    /// Reduces the event to what subscribers act on. Node selection keeps the
    /// path and content length, never the content.
    pub(super) fn into_intent(self) -> Intent {
        match self {
            Self::ExecuteRefactoring(task) => Intent::ExecuteProtocol {
                target_id: task.id,
                protocol_type: task.task_type,
                files_involved: task.files_involved,
            },
            Self::SimulateImpact(task) => Intent::SimulateImpact {
                target_id: task.id,
                files_involved: task.files_involved,
            },
            Self::RefactoringComplete { task_id, snapshot } => Intent::UpdateSnapshot {
                target_id: task_id,
                snapshot,
            },
            Self::NodeSelected(file) => Intent::ViewNode {
                node_size: file.content.len(),
                target_id: file.path,
            },
            Self::WisdomFetchStart => Intent::StateChangeThinking {
                target_id: "WisdomEngine".to_string(),
            },
            Self::WisdomFetchEnd => Intent::StateChangeIdle {
                target_id: "WisdomEngine".to_string(),
            },
        }
    }
}

/// The payload subscribers receive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "intent", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    ExecuteProtocol {
        target_id: String,
        protocol_type: TaskType,
        files_involved: Vec<String>,
    },
    SimulateImpact {
        target_id: String,
        files_involved: Vec<String>,
    },
    UpdateSnapshot {
        target_id: String,
        snapshot: Snapshot,
    },
    ViewNode {
        target_id: String,
        node_size: usize,
    },
    StateChangeThinking {
        target_id: String,
    },
    StateChangeIdle {
        target_id: String,
    },
}

impl Intent {
    pub fn target_id(&self) -> &str {
        match self {
            Self::ExecuteProtocol { target_id, .. }
            | Self::SimulateImpact { target_id, .. }
            | Self::UpdateSnapshot { target_id, .. }
            | Self::ViewNode { target_id, .. }
            | Self::StateChangeThinking { target_id }
            | Self::StateChangeIdle { target_id } => target_id,
        }
    }
}

/// An accepted, sealed event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    kind: EventKind,
    intent: Intent,
    sequence: u64,
    hash: String,
}

impl Envelope {
    pub(super) fn seal(kind: EventKind, intent: Intent, sequence: u64) -> BusResult<Self> {
        let bytes = serde_json::to_vec(&intent)?;
        let hash = blake3::hash(&bytes).to_hex().to_string();
        Ok(Self {
            kind,
            intent,
            sequence,
            hash,
        })
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    /// Position of this event in its bus's publish order, from 1.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// BLAKE3 hex digest of the intent's JSON form.
    pub fn hash(&self) -> &str {
        &self.hash
    }
}
