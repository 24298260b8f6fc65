//! Builder API for ergonomic machine and store construction.
//!
//! This module provides the `machine!` declaration macro and a fluent
//! builder for stores.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StoreBuilder;
