//! Derived views over a store.
//!
//! A view keeps a value derived from the current state, the way a UI binding
//! observes a store through a selector. It re-reads the store on every change
//! notification instead of trusting the callback arguments, since the state
//! may already have moved on by the time it looks.

use crate::core::State;
use crate::store::shared::Shared;
use crate::store::Subscription;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

struct Cached<T> {
    value: RwLock<T>,
    version: AtomicU64,
}

/// A value derived from a store's state, kept current while the view lives.
///
/// Dropping the view unsubscribes it.
///
/// # Example
///
/// ```rust
/// use fsm_store::core::State;
/// use fsm_store::machine;
/// use fsm_store::store::MachineStore;
///
/// #[derive(Debug)]
/// struct Off;
///
/// #[derive(Debug)]
/// struct On { level: u8 }
///
/// machine! {
///     enum Lamp: LampKind {
///         Off(Off) => [On],
///         On(On) => [Off],
///     }
/// }
///
/// let store = MachineStore::new(Lamp::Off(Off), |_| ());
/// let lit = store.view(|lamp: &Lamp| lamp.kind() == LampKind::On);
/// assert!(!lit.get());
///
/// store.transition(LampKind::Off, Lamp::On(On { level: 3 })).unwrap();
/// assert!(lit.get());
/// assert_eq!(lit.version(), 1);
/// ```
pub struct StoreView<S: State, T> {
    cached: Arc<Cached<T>>,
    subscription: Subscription<S>,
}

impl<S: State, T> StoreView<S, T>
where
    T: PartialEq + Send + Sync + 'static,
{
    pub(crate) fn new<F>(shared: &Arc<Shared<S>>, selector: F) -> Self
    where
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        let cached = Arc::new(Cached {
            value: RwLock::new(selector(&shared.get())),
            version: AtomicU64::new(0),
        });

        let store = Arc::downgrade(shared);
        let sink = Arc::clone(&cached);
        let id = shared.subscribe(Arc::new(move |_: &S, _: &S| {
            let Some(store) = store.upgrade() else {
                return;
            };
            let derived = selector(&store.get());
            let mut value = sink.value.write();
            if *value != derived {
                *value = derived;
                sink.version.fetch_add(1, Ordering::SeqCst);
            }
        }));

        Self {
            cached,
            subscription: Subscription::new(shared, id),
        }
    }

    /// Number of times the derived value has changed.
    pub fn version(&self) -> u64 {
        self.cached.version.load(Ordering::SeqCst)
    }

    /// Run `f` against the current derived value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cached.value.read())
    }
}

impl<S: State, T> StoreView<S, T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// The current derived value.
    pub fn get(&self) -> T {
        self.cached.value.read().clone()
    }
}

impl<S: State, T> Drop for StoreView<S, T> {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

impl<S: State, T: fmt::Debug> fmt::Debug for StoreView<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreView")
            .field("value", &*self.cached.value.read())
            .field("version", &self.cached.version.load(Ordering::SeqCst))
            .finish()
    }
}
