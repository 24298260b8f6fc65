//! Builder for constructing stores.

use crate::builder::error::BuildError;
use crate::core::State;
use crate::store::shared::Shared;
use crate::store::{MachineHandle, MachineStore};

/// Builder for constructing a [`MachineStore`] with a fluent API.
pub struct StoreBuilder<S: State> {
    initial: Option<S>,
    label: Option<String>,
}

impl<S: State> StoreBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            label: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Name the store in logs and debug output (optional).
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Build the store, running `create_actions` once against it.
    /// Returns an error if required fields are missing.
    pub fn build<A, F>(self, create_actions: F) -> Result<MachineStore<S, A>, BuildError>
    where
        F: FnOnce(MachineHandle<S>) -> A,
    {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.label.as_deref().is_some_and(|label| label.trim().is_empty()) {
            return Err(BuildError::EmptyLabel);
        }

        Ok(MachineStore::from_shared(
            Shared::new(initial, self.label),
            create_actions,
        ))
    }
}

impl<S: State> Default for StoreBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}
