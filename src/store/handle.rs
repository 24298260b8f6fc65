//! Handle given to action factories.

use super::shared::Shared;
use crate::core::{Edge, Payload, State, TransitionError};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Read and transition access to a store's live state.
///
/// Actions receive this handle when the store is built. It can read the
/// current state and request guarded transitions, and nothing else. Clones
/// share the same state, and a handle stays valid for as long as it is held.
///
/// Callbacks that run after the action returned (timers, socket events)
/// must re-read the state with [`get`](Self::get) before deciding to
/// transition, since other transitions may have happened in between.
pub struct MachineHandle<S: State> {
    pub(crate) shared: Arc<Shared<S>>,
}

impl<S: State> MachineHandle<S> {
    pub(crate) fn new(shared: Arc<Shared<S>>) -> Self {
        Self { shared }
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> Arc<S> {
        self.shared.get()
    }

    /// Kind of the current state.
    pub fn kind(&self) -> S::Kind {
        self.shared.kind()
    }

    /// Whether the store is currently in `kind`.
    pub fn is_in(&self, kind: S::Kind) -> bool {
        self.shared.kind() == kind
    }

    /// Move from `from` to `next`.
    ///
    /// Fails with [`TransitionError::IllegalTarget`] when `next`'s kind is not
    /// a declared successor of `from`, and with
    /// [`TransitionError::InvalidTransition`] when the store is not in `from`.
    /// On failure the state is left unchanged.
    pub fn transition(&self, from: S::Kind, next: S) -> Result<Arc<S>, TransitionError<S::Kind>> {
        self.shared.transition(from, next)
    }

    /// Move from the state whose payload is `_from` into the state carrying
    /// `to`.
    ///
    /// The edge is checked at compile time through [`Edge`]; only the
    /// live-state precondition can fail.
    pub fn advance<F, T>(&self, _from: &F, to: T) -> Result<Arc<S>, TransitionError<S::Kind>>
    where
        F: Edge<T> + Payload<State = S>,
        T: Payload<State = S>,
    {
        self.shared.transition(F::KIND, to.into_state())
    }

    /// Identifier of the store this handle belongs to.
    pub fn store_id(&self) -> Uuid {
        self.shared.id()
    }
}

impl<S: State> Clone for MachineHandle<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: State> fmt::Debug for MachineHandle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineHandle")
            .field("store", &self.shared.id())
            .field("kind", &self.shared.kind())
            .finish()
    }
}
