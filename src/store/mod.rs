//! The runtime store.
//!
//! This module holds the one mutable part of the crate: the cell that keeps
//! the current state of a machine, the guarded transition that replaces it,
//! and the listeners told about each change.
//!
//! # Key Concepts
//!
//! - **MachineStore**: owns the cell and the actions built for it
//! - **MachineHandle**: what actions get: `get`, `transition`, `advance`
//! - **Subscription**: removes a listener again; removing twice is harmless

mod handle;
mod subscription;
mod machine;
pub(crate) mod shared;

pub use handle::MachineHandle;
pub use subscription::{listener, Listener, Subscription};
pub use machine::MachineStore;
