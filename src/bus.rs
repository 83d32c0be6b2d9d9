//! Synchronous in-process notification bus for task mutations.
//!
//! Typed events instead of stringly event names: a handler subscribes to
//! [`TaskEvent`]s and cannot silently mismatch on a misspelled name.
//! Dispatch is synchronous and single-threaded; handlers may subscribe or
//! unsubscribe (including themselves) while an emit is in flight.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskEventKind {
    Created,
    Updated,
    Deleted,
}

/// Payload for a task mutation notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskEvent {
    pub kind: TaskEventKind,
    pub task_id: Uuid,
    pub project_id: Option<Uuid>,
}

/// Opaque subscription token returned by [`EventBus::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerId(u64);

type Handler = Rc<dyn Fn(&TaskEvent)>;

#[derive(Default)]
pub struct EventBus {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(HandlerId, Handler)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; keep the returned id to unsubscribe.
    pub fn on(&self, handler: impl Fn(&TaskEvent) + 'static) -> HandlerId {
        let id = HandlerId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Remove a handler. Returns false if the id was already gone.
    pub fn off(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(hid, _)| *hid != id);
        handlers.len() != before
    }

    /// Deliver an event to every handler registered at emit time.
    ///
    /// The handler list is snapshotted before dispatch, so handlers can
    /// call `on`/`off` without poisoning the iteration.
    pub fn emit(&self, event: TaskEvent) {
        let snapshot: Vec<Handler> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in snapshot {
            handler(&event);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}
