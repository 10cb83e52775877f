//! Publish/subscribe event dispatch between the UI and the engines.
//!
//! Buses are plain values: construct one with [`LocalBus::new`] and hand it
//! to whatever needs it. There is no process-wide instance.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use modscope::bus::{Event, EventBus, EventKind, LocalBus};
//!
//! let bus = LocalBus::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! bus.subscribe(
//!     EventKind::WisdomFetchStart,
//!     Box::new(move |envelope| {
//!         sink.borrow_mut().push(envelope.sequence());
//!         Ok(())
//!     }),
//! );
//!
//! bus.publish(Event::WisdomFetchStart).unwrap();
//! assert_eq!(*seen.borrow(), vec![1]);
//! ```

mod event;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, error};

pub use event::{Envelope, Event, EventKind, Intent};

#[derive(Debug, Error)]
pub enum BusError {
    #[error("Invalid payload for {kind:?}: {reason}")]
    InvalidPayload { kind: EventKind, reason: String },

    #[error("Failed to encode intent: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type BusResult<T> = Result<T, BusError>;

/// A subscriber callback. An `Err` is logged and does not stop delivery to
/// the remaining subscribers.
pub type Handler = Box<dyn Fn(&Envelope) -> anyhow::Result<()>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub trait EventBus {
    /// Validates, seals and delivers an event, returning its envelope.
    /// Invalid events reach no subscriber.
    fn publish(&self, event: Event) -> BusResult<Envelope>;

    fn subscribe(&self, kind: EventKind, handler: Handler) -> SubscriptionId;

    /// Returns `false` if the subscription was already gone.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

struct Subscriber {
    id: SubscriptionId,
    kind: EventKind,
    handler: Rc<dyn Fn(&Envelope) -> anyhow::Result<()>>,
}

/// Single-threaded, in-process bus. Handlers run synchronously inside
/// `publish`, in subscription order, and may publish or subscribe themselves.
#[derive(Default)]
pub struct LocalBus {
    subscribers: RefCell<Vec<Subscriber>>,
    next_id: Cell<u64>,
    sequence: Cell<u64>,
}

impl LocalBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers
            .borrow()
            .iter()
            .filter(|s| s.kind == kind)
            .count()
    }
}

impl EventBus for LocalBus {
    fn publish(&self, event: Event) -> BusResult<Envelope> {
        let kind = event.kind();
        if let Err(e) = event.validate() {
            error!(?kind, error = %e, "Rejected event");
            return Err(e);
        }

        let sequence = self.sequence.get() + 1;
        self.sequence.set(sequence);
        let envelope = Envelope::seal(kind, event.into_intent(), sequence)?;
        debug!(?kind, sequence, hash = envelope.hash(), "Publishing event");

        // Release the borrow before dispatch so handlers can re-enter the bus
        let handlers: Vec<_> = self
            .subscribers
            .borrow()
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| Rc::clone(&s.handler))
            .collect();

        for handler in handlers {
            if let Err(e) = handler(&envelope) {
                error!(?kind, error = %e, "Subscriber failed");
            }
        }

        Ok(envelope)
    }

    fn subscribe(&self, kind: EventKind, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push(Subscriber {
            id,
            kind,
            handler: Rc::from(handler),
        });
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        let removed = subscribers.len() != before;
        if removed {
            debug!(?id, "Unsubscribed");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::FileRecord;
    use crate::tasks::{RefactoringTask, TaskType};
    use pretty_assertions::assert_eq;

    fn recorder(bus: &LocalBus, kind: EventKind) -> Rc<RefCell<Vec<Envelope>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe(
            kind,
            Box::new(move |envelope| {
                sink.borrow_mut().push(envelope.clone());
                Ok(())
            }),
        );
        seen
    }

    fn task(id: &str, files: &[&str]) -> RefactoringTask {
        RefactoringTask {
            id: id.to_string(),
            task_type: TaskType::RemoveDeadCode,
            title_key: "t".to_string(),
            description_key: "d".to_string(),
            files_involved: files.iter().map(|f| f.to_string()).collect(),
            plan_keys: vec![],
        }
    }

    #[test]
    fn test_delivers_only_to_matching_kind() {
        let bus = LocalBus::new();
        let starts = recorder(&bus, EventKind::WisdomFetchStart);
        let ends = recorder(&bus, EventKind::WisdomFetchEnd);

        bus.publish(Event::WisdomFetchStart).unwrap();
        bus.publish(Event::WisdomFetchStart).unwrap();

        assert_eq!(starts.borrow().len(), 2);
        assert!(ends.borrow().is_empty());
        assert_eq!(starts.borrow()[1].sequence(), 2);
    }

    #[test]
    fn test_buses_are_independent() {
        let first = LocalBus::new();
        let second = LocalBus::new();
        let seen = recorder(&first, EventKind::WisdomFetchEnd);

        second.publish(Event::WisdomFetchEnd).unwrap();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_node_selection_drops_content() {
        let bus = LocalBus::new();
        let seen = recorder(&bus, EventKind::NodeSelected);

        bus.publish(Event::NodeSelected(FileRecord::new("src/a.ts", "secret")))
            .unwrap();

        assert_eq!(
            seen.borrow()[0].intent(),
            &Intent::ViewNode {
                target_id: "src/a.ts".to_string(),
                node_size: 6,
            }
        );
    }

    #[test]
    fn test_invalid_payload_rejected() {
        let bus = LocalBus::new();
        let seen = recorder(&bus, EventKind::ExecuteRefactoringProtocol);

        let err = bus
            .publish(Event::ExecuteRefactoring(task("", &["a.ts"])))
            .unwrap_err();
        assert!(matches!(err, BusError::InvalidPayload { .. }));

        let err = bus
            .publish(Event::ExecuteRefactoring(task("T", &["a.ts", ""])))
            .unwrap_err();
        assert!(matches!(err, BusError::InvalidPayload { .. }));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_failing_subscriber_does_not_block_others() {
        let bus = LocalBus::new();
        bus.subscribe(
            EventKind::SimulateImpact,
            Box::new(|_| Err(anyhow::anyhow!("boom"))),
        );
        let seen = recorder(&bus, EventKind::SimulateImpact);

        let envelope = bus
            .publish(Event::SimulateImpact(task("T", &["a.ts"])))
            .unwrap();
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(envelope.intent().target_id(), "T");
    }

    #[test]
    fn test_unsubscribe() {
        let bus = LocalBus::new();
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        let id = bus.subscribe(
            EventKind::WisdomFetchStart,
            Box::new(move |_| {
                counter.set(counter.get() + 1);
                Ok(())
            }),
        );

        bus.publish(Event::WisdomFetchStart).unwrap();
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(Event::WisdomFetchStart).unwrap();

        assert_eq!(seen.get(), 1);
        assert_eq!(bus.subscriber_count(EventKind::WisdomFetchStart), 0);
    }

    #[test]
    fn test_hash_depends_on_intent_only() {
        let bus = LocalBus::new();
        let a = bus.publish(Event::WisdomFetchStart).unwrap();
        let b = bus.publish(Event::WisdomFetchStart).unwrap();
        let c = bus.publish(Event::WisdomFetchEnd).unwrap();

        assert_eq!(a.hash(), b.hash());
        assert_ne!(a.hash(), c.hash());
        assert_eq!(a.hash().len(), 64);
    }

    #[test]
    fn test_handler_may_publish() {
        let bus = Rc::new(LocalBus::new());
        let ends = recorder(&bus, EventKind::WisdomFetchEnd);
        let inner = Rc::clone(&bus);
        bus.subscribe(
            EventKind::WisdomFetchStart,
            Box::new(move |_| {
                inner.publish(Event::WisdomFetchEnd)?;
                Ok(())
            }),
        );

        bus.publish(Event::WisdomFetchStart).unwrap();
        assert_eq!(ends.borrow().len(), 1);
    }
}
