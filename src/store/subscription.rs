//! Change listeners and subscriptions.

use super::shared::Shared;
use crate::core::State;
use std::fmt;
use std::sync::{Arc, Weak};

/// Callback invoked with `(previous, next)` after every accepted transition.
///
/// Listeners are identified by their `Arc`: subscribing the same `Arc` twice
/// registers it once.
pub type Listener<S> = Arc<dyn Fn(&S, &S) + Send + Sync>;

/// Wrap a closure into a [`Listener`].
///
/// # Example
///
/// ```
/// use fsm_store::machine;
/// use fsm_store::store::{listener, Listener};
///
/// #[derive(Debug)]
/// struct Off;
///
/// #[derive(Debug)]
/// struct On;
///
/// machine! {
///     enum Switch: SwitchKind {
///         Off(Off) => [On],
///         On(On) => [Off],
///     }
/// }
///
/// let _log: Listener<Switch> = listener(|prev: &Switch, next: &Switch| {
///     println!("{prev:?} -> {next:?}");
/// });
/// ```
pub fn listener<S, F>(f: F) -> Listener<S>
where
    S: State,
    F: Fn(&S, &S) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Identifier of a registered listener, unique within one store.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct ListenerId(u64);

/// Listeners of one store, in registration order.
pub(crate) struct ListenerSet<S: State> {
    entries: Vec<(ListenerId, Listener<S>)>,
    next_id: u64,
}

impl<S: State> ListenerSet<S> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a listener, returning the id of the existing entry when the
    /// same listener is already registered.
    pub(crate) fn insert(&mut self, listener: Listener<S>) -> (ListenerId, bool) {
        if let Some((id, _)) = self
            .entries
            .iter()
            .find(|(_, existing)| Arc::ptr_eq(existing, &listener))
        {
            return (*id, false);
        }

        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        (id, true)
    }

    /// Remove a listener. Returns `false` when it was not registered.
    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(existing, _)| *existing == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Listeners registered right now, for one round of notification.
    pub(crate) fn snapshot(&self) -> Vec<(ListenerId, Listener<S>)> {
        self.entries
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect()
    }
}

/// Handle returned by `subscribe`, used to remove the listener again.
///
/// Dropping a subscription does not unsubscribe; the listener stays
/// registered until [`Subscription::unsubscribe`] is called.
pub struct Subscription<S: State> {
    shared: Weak<Shared<S>>,
    id: ListenerId,
}

impl<S: State> Subscription<S> {
    pub(crate) fn new(shared: &Arc<Shared<S>>, id: ListenerId) -> Self {
        Self {
            shared: Arc::downgrade(shared),
            id,
        }
    }

    /// Remove the listener from its store.
    ///
    /// Calling this more than once, or after the store is gone, is a no-op.
    pub fn unsubscribe(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.unsubscribe(self.id);
        }
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.shared
            .upgrade()
            .is_some_and(|shared| shared.is_subscribed(self.id))
    }
}

impl<S: State> Clone for Subscription<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Weak::clone(&self.shared),
            id: self.id,
        }
    }
}

impl<S: State> fmt::Debug for Subscription<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id.0)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Unit;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum UnitKind {
        Unit,
    }

    impl fmt::Display for UnitKind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("Unit")
        }
    }

    impl crate::core::Kind for UnitKind {
        fn name(&self) -> &'static str {
            "Unit"
        }

        fn all() -> &'static [Self] {
            &[Self::Unit]
        }

        fn successors(&self) -> &'static [Self] {
            &[Self::Unit]
        }
    }

    impl State for Unit {
        type Kind = UnitKind;

        fn kind(&self) -> UnitKind {
            UnitKind::Unit
        }
    }

    #[test]
    fn insert_assigns_fresh_ids() {
        let mut set = ListenerSet::<Unit>::new();
        let (a, added_a) = set.insert(listener(|_, _| {}));
        let (b, added_b) = set.insert(listener(|_, _| {}));

        assert!(added_a);
        assert!(added_b);
        assert_ne!(a, b);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn insert_dedupes_by_identity() {
        let mut set = ListenerSet::<Unit>::new();
        let shared: Listener<Unit> = listener(|_, _| {});

        let (first, added_first) = set.insert(Arc::clone(&shared));
        let (second, added_second) = set.insert(shared);

        assert!(added_first);
        assert!(!added_second);
        assert_eq!(first, second);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut set = ListenerSet::<Unit>::new();
        let (id, _) = set.insert(listener(|_, _| {}));

        assert!(set.remove(id));
        assert!(!set.remove(id));
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut set = ListenerSet::<Unit>::new();
        let (first, _) = set.insert(listener(|_, _| {}));
        set.remove(first);
        let (second, _) = set.insert(listener(|_, _| {}));

        assert_ne!(first, second);
    }

    #[test]
    fn snapshot_keeps_registration_order() {
        let mut set = ListenerSet::<Unit>::new();
        let a: Listener<Unit> = listener(|_, _| {});
        let b: Listener<Unit> = listener(|_, _| {});
        set.insert(Arc::clone(&a));
        set.insert(Arc::clone(&b));

        let snapshot = set.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(Arc::ptr_eq(&snapshot[0].1, &a));
        assert!(Arc::ptr_eq(&snapshot[1].1, &b));
    }
}
