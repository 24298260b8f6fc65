//! fsm-store: a finite state machine store
//!
//! A store holds exactly one current state of a declared machine. Each state
//! kind carries its own payload, and the only way to move between kinds is
//! a transition along a declared edge, accepted only while the store is
//! actually in the kind the caller names as its source. Observers subscribe
//! to be told about every accepted change.
//!
//! # Core Concepts
//!
//! - **State / Kind / Payload**: a machine is an enum of payload-carrying
//!   variants, declared with [`machine!`] along with its transition table
//! - **MachineStore**: `get`, `transition`, `subscribe` and `actions`
//! - **MachineHandle**: the read-and-transition access actions are built on
//! - **StoreView**: a selector-derived value kept current by the store
//!
//! # Example
//!
//! ```rust
//! use fsm_store::core::{State, TransitionError};
//! use fsm_store::machine;
//! use fsm_store::store::MachineStore;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! pub struct Idle { pub addr: String }
//!
//! #[derive(Debug, Clone, PartialEq)]
//! pub struct Connecting { pub addr: String }
//!
//! #[derive(Debug, Clone, PartialEq)]
//! pub struct Connected { pub addr: String }
//!
//! #[derive(Debug, Clone, PartialEq)]
//! pub struct Failed { pub message: String }
//!
//! machine! {
//!     #[derive(Clone, PartialEq)]
//!     pub enum Socket: SocketKind {
//!         Idle(Idle) => [Connecting],
//!         Connecting(Connecting) => [Failed, Connected],
//!         Connected(Connected) => [Idle, Failed],
//!         Error(Failed) => [Idle],
//!     }
//! }
//!
//! let store = MachineStore::new(Socket::Idle(Idle { addr: "ws://h".into() }), |_| ());
//! store.subscribe_fn(|prev: &Socket, next: &Socket| {
//!     println!("{} -> {}", prev.name(), next.name());
//! });
//!
//! store
//!     .transition(SocketKind::Idle, Socket::Connecting(Connecting { addr: "ws://h".into() }))
//!     .unwrap();
//! assert_eq!(store.kind(), SocketKind::Connecting);
//!
//! let stale = store.transition(SocketKind::Idle, Socket::Connecting(Connecting { addr: "ws://h".into() }));
//! assert_eq!(
//!     stale.unwrap_err(),
//!     TransitionError::InvalidTransition {
//!         expected: SocketKind::Idle,
//!         actual: SocketKind::Connecting,
//!     }
//! );
//! ```

pub mod builder;
pub mod core;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use self::builder::{BuildError, StoreBuilder};
pub use self::core::{Edge, Kind, Payload, State, TransitionError};
pub use self::store::{listener, Listener, MachineHandle, MachineStore, Subscription};
pub use self::view::StoreView;
