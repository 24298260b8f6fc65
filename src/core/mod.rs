//! Core state machine types.
//!
//! This module contains the declarations every machine is built from:
//! - State values via the `State` trait
//! - Discriminants and the static transition table via the `Kind` trait
//! - Per-kind field sets via `Payload`, and declared edges via `Edge`
//! - The errors a rejected transition reports

mod error;
mod state;

pub use error::TransitionError;
pub use state::{Edge, Kind, Payload, State};
