//! The shared cell behind a store and its handles.

use super::subscription::{Listener, ListenerId, ListenerSet};
use crate::core::{Kind, State, TransitionError};
use parking_lot::{Mutex, RwLock};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, trace, warn};
use uuid::Uuid;

/// Current state and listeners of one store instance.
///
/// This is the only writer of the state: every change goes through
/// [`Shared::transition`].
pub(crate) struct Shared<S: State> {
    id: Uuid,
    label: Option<String>,
    state: RwLock<Arc<S>>,
    listeners: Mutex<ListenerSet<S>>,
}

impl<S: State> Shared<S> {
    pub(crate) fn new(initial: S, label: Option<String>) -> Self {
        let id = Uuid::new_v4();
        debug!(
            store = %id,
            label = label.as_deref().unwrap_or(""),
            initial = %initial.kind(),
            "created state machine store"
        );
        Self {
            id,
            label,
            state: RwLock::new(Arc::new(initial)),
            listeners: Mutex::new(ListenerSet::new()),
        }
    }

    pub(crate) fn id(&self) -> Uuid {
        self.id
    }

    pub(crate) fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub(crate) fn get(&self) -> Arc<S> {
        Arc::clone(&self.state.read())
    }

    pub(crate) fn kind(&self) -> S::Kind {
        self.state.read().kind()
    }

    /// Replace the current state with `next` if the live kind is `from` and
    /// `next`'s kind is a declared successor of `from`, then notify every
    /// listener registered at this moment.
    pub(crate) fn transition(
        &self,
        from: S::Kind,
        next: S,
    ) -> Result<Arc<S>, TransitionError<S::Kind>> {
        let to = next.kind();
        if !from.can_transition_to(to) {
            warn!(store = %self.id, %from, %to, "rejected transition to undeclared successor");
            return Err(TransitionError::IllegalTarget { from, to });
        }

        let next = Arc::new(next);
        let previous = {
            let mut current = self.state.write();
            let actual = current.kind();
            if actual != from {
                drop(current);
                warn!(
                    store = %self.id,
                    expected = %from,
                    %actual,
                    %to,
                    "rejected transition from stale state"
                );
                return Err(TransitionError::InvalidTransition {
                    expected: from,
                    actual,
                });
            }
            std::mem::replace(&mut *current, Arc::clone(&next))
        };

        debug!(store = %self.id, %from, %to, "state transition");
        self.notify(&previous, &next);
        Ok(next)
    }

    /// Call each listener once with `(previous, next)`.
    ///
    /// The round covers the listeners registered when it starts. One that is
    /// unsubscribed before its turn is skipped. A panicking listener does not
    /// stop the others; the first panic is resumed once every listener has
    /// run.
    fn notify(&self, previous: &S, next: &S) {
        let listeners = self.listeners.lock().snapshot();
        let mut first_panic = None;

        for (id, listener) in listeners {
            if !self.is_subscribed(id) {
                continue;
            }
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener(previous, next)));
            if let Err(payload) = outcome {
                error!(
                    store = %self.id,
                    from = %previous.kind(),
                    to = %next.kind(),
                    "listener panicked during notification"
                );
                first_panic.get_or_insert(payload);
            }
        }

        if let Some(payload) = first_panic {
            panic::resume_unwind(payload);
        }
    }

    pub(crate) fn subscribe(&self, listener: Listener<S>) -> ListenerId {
        let (id, added) = self.listeners.lock().insert(listener);
        if added {
            trace!(store = %self.id, listener = ?id, "listener subscribed");
        } else {
            trace!(store = %self.id, listener = ?id, "listener already subscribed");
        }
        id
    }

    pub(crate) fn unsubscribe(&self, id: ListenerId) {
        if self.listeners.lock().remove(id) {
            trace!(store = %self.id, listener = ?id, "listener unsubscribed");
        }
    }

    pub(crate) fn is_subscribed(&self, id: ListenerId) -> bool {
        self.listeners.lock().contains(id)
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}
