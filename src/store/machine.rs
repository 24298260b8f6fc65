//! The state machine store.

use super::handle::MachineHandle;
use super::subscription::{Listener, Subscription};
use super::shared::Shared;
use crate::core::{Edge, Payload, State, TransitionError};
use crate::view::StoreView;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Store holding exactly one current state of a declared machine.
///
/// The only way to change the state is a guarded transition, which is
/// accepted only from the kind it names as its source and only into one of
/// that kind's declared successors. Every accepted transition is announced to
/// the subscribed listeners as `(previous, next)`.
///
/// `A` is the action set built by the factory passed at construction.
///
/// # Example
///
/// ```rust
/// use fsm_store::core::{State, TransitionError};
/// use fsm_store::machine;
/// use fsm_store::store::{MachineHandle, MachineStore};
///
/// #[derive(Debug)]
/// pub struct Idle { pub addr: String }
///
/// #[derive(Debug)]
/// pub struct Connecting { pub addr: String }
///
/// machine! {
///     pub enum Conn: ConnKind {
///         Idle(Idle) => [Connecting],
///         Connecting(Connecting) => [Idle],
///     }
/// }
///
/// struct Actions {
///     machine: MachineHandle<Conn>,
/// }
///
/// impl Actions {
///     fn connect(&self, idle: &Idle) -> Result<(), TransitionError<ConnKind>> {
///         self.machine.advance(idle, Connecting { addr: idle.addr.clone() })?;
///         Ok(())
///     }
/// }
///
/// let store = MachineStore::new(
///     Conn::Idle(Idle { addr: "ws://h".to_string() }),
///     |machine| Actions { machine },
/// );
///
/// if let Conn::Idle(idle) = &*store.get() {
///     store.actions().connect(idle).unwrap();
/// }
/// assert_eq!(store.get().kind(), ConnKind::Connecting);
/// ```
pub struct MachineStore<S: State, A = ()> {
    handle: MachineHandle<S>,
    actions: A,
}

impl<S: State, A> MachineStore<S, A> {
    /// Create a store in `initial` and build its actions.
    ///
    /// `create_actions` runs exactly once, before this returns, with a handle
    /// bound to the new store.
    pub fn new<F>(initial: S, create_actions: F) -> Self
    where
        F: FnOnce(MachineHandle<S>) -> A,
    {
        Self::from_shared(Shared::new(initial, None), create_actions)
    }

    pub(crate) fn from_shared<F>(shared: Shared<S>, create_actions: F) -> Self
    where
        F: FnOnce(MachineHandle<S>) -> A,
    {
        let handle = MachineHandle::new(Arc::new(shared));
        let actions = create_actions(handle.clone());
        Self { handle, actions }
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> Arc<S> {
        self.handle.get()
    }

    /// Kind of the current state.
    pub fn kind(&self) -> S::Kind {
        self.handle.kind()
    }

    /// Move from `from` to `next`, notifying listeners on success.
    ///
    /// See [`MachineHandle::transition`].
    pub fn transition(&self, from: S::Kind, next: S) -> Result<Arc<S>, TransitionError<S::Kind>> {
        self.handle.transition(from, next)
    }

    /// Move along a statically declared edge.
    ///
    /// See [`MachineHandle::advance`].
    pub fn advance<F, T>(&self, from: &F, to: T) -> Result<Arc<S>, TransitionError<S::Kind>>
    where
        F: Edge<T> + Payload<State = S>,
        T: Payload<State = S>,
    {
        self.handle.advance(from, to)
    }

    /// Register a listener for accepted transitions.
    ///
    /// A listener that is already registered (the same `Arc`) is not added
    /// again; the returned subscription then refers to the existing entry.
    ///
    /// Listeners run in registration order. A listener that transitions the
    /// store from inside its callback starts a nested round, so later
    /// listeners see the nested `(previous, next)` pair before the outer one.
    /// Read the current state with [`get`](Self::get) rather than relying on
    /// the last pair received.
    pub fn subscribe(&self, listener: Listener<S>) -> Subscription<S> {
        let id = self.handle.shared.subscribe(listener);
        Subscription::new(&self.handle.shared, id)
    }

    /// Register a closure as a new listener.
    pub fn subscribe_fn<F>(&self, f: F) -> Subscription<S>
    where
        F: Fn(&S, &S) + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(f))
    }

    /// Derive a value from the state and keep it current.
    pub fn view<T, F>(&self, selector: F) -> StoreView<S, T>
    where
        T: PartialEq + Send + Sync + 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        StoreView::new(&self.handle.shared, selector)
    }

    /// The actions built at construction.
    pub fn actions(&self) -> &A {
        &self.actions
    }

    /// Another handle to this store's state.
    pub fn handle(&self) -> MachineHandle<S> {
        self.handle.clone()
    }

    /// Unique identifier of this store instance.
    pub fn id(&self) -> Uuid {
        self.handle.shared.id()
    }

    /// Label given at build time, if any.
    pub fn label(&self) -> Option<&str> {
        self.handle.shared.label()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.handle.shared.listener_count()
    }
}

impl<S: State, A> fmt::Debug for MachineStore<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineStore")
            .field("id", &self.id())
            .field("label", &self.label())
            .field("state", &self.get())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
