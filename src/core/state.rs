//! State, kind and payload traits.
//!
//! A machine is declared as an enum whose variants each wrap one payload
//! struct. The variant's discriminant is its [`Kind`]; the transition table
//! lives on the kind as a static successor list.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Discriminant of a state machine's states.
///
/// Implementations are fieldless enums, usually generated by
/// [`machine!`](crate::machine). The successor list of each kind is the
/// transition table row for that kind and is fixed at compile time.
///
/// # Example
///
/// ```rust
/// use fsm_store::core::Kind;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Light {
///     Red,
///     Green,
/// }
///
/// impl std::fmt::Display for Light {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str(self.name())
///     }
/// }
///
/// impl Kind for Light {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Red => "Red",
///             Self::Green => "Green",
///         }
///     }
///
///     fn all() -> &'static [Self] {
///         &[Self::Red, Self::Green]
///     }
///
///     fn successors(&self) -> &'static [Self] {
///         match self {
///             Self::Red => &[Self::Green],
///             Self::Green => &[Self::Red],
///         }
///     }
/// }
///
/// assert!(Light::Red.can_transition_to(Light::Green));
/// assert!(!Light::Red.can_transition_to(Light::Red));
/// ```
pub trait Kind: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static {
    /// Name of the kind for display/logging.
    fn name(&self) -> &'static str;

    /// Every declared kind, in declaration order.
    fn all() -> &'static [Self];

    /// Kinds this kind may transition into.
    fn successors(&self) -> &'static [Self];

    /// Whether `to` is a declared successor of this kind.
    fn can_transition_to(&self, to: Self) -> bool {
        self.successors().contains(&to)
    }

    /// A kind with no successors can never be left.
    fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}

/// Trait for state machine states.
///
/// A state is a tagged value: its [`Kind`] plus the payload carried by that
/// kind. States are never mutated in place by a store; every accepted
/// transition replaces the whole value.
pub trait State: Debug + Send + Sync + 'static {
    /// The discriminant type of this machine.
    type Kind: Kind;

    /// The kind of this state value.
    fn kind(&self) -> Self::Kind;

    /// Name of this state's kind.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Whether this state's kind has no successors.
    fn is_terminal(&self) -> bool {
        self.kind().is_terminal()
    }
}

/// Field set carried by exactly one kind of a machine.
///
/// Each payload type belongs to one state type and one kind, so the shape of
/// a state is fully determined by its kind.
pub trait Payload: Debug + Sized + Send + Sync + 'static {
    /// The machine this payload belongs to.
    type State: State;

    /// The kind this payload is carried by.
    const KIND: <Self::State as State>::Kind;

    /// Wrap the payload into its state variant.
    fn into_state(self) -> Self::State;

    /// Borrow the payload out of a state if the state is of this kind.
    fn peek(state: &Self::State) -> Option<&Self>;
}

/// Marker for a declared edge from `Self`'s kind to `To`'s kind.
///
/// Implemented by [`machine!`](crate::machine) for each entry in the
/// transition table. Typed transitions require this bound, so a transition
/// into an undeclared successor does not compile.
pub trait Edge<To: Payload>: Payload {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Pending {
        pub job: u32,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Running {
        pub job: u32,
        pub worker: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Done {
        pub job: u32,
    }

    machine! {
        #[derive(Clone, PartialEq)]
        pub enum Task: TaskKind {
            Pending(Pending) => [Running],
            Running(Running) => [Done, Pending],
            Done(Done) => [],
        }
    }

    #[test]
    fn kind_names_follow_variants() {
        assert_eq!(TaskKind::Pending.name(), "Pending");
        assert_eq!(TaskKind::Running.name(), "Running");
        assert_eq!(TaskKind::Done.name(), "Done");
        assert_eq!(TaskKind::Done.to_string(), "Done");
    }

    #[test]
    fn all_lists_kinds_in_declaration_order() {
        assert_eq!(
            TaskKind::all(),
            &[TaskKind::Pending, TaskKind::Running, TaskKind::Done]
        );
    }

    #[test]
    fn successors_follow_the_declared_table() {
        assert_eq!(TaskKind::Pending.successors(), &[TaskKind::Running]);
        assert_eq!(
            TaskKind::Running.successors(),
            &[TaskKind::Done, TaskKind::Pending]
        );
        assert!(TaskKind::Done.successors().is_empty());
    }

    #[test]
    fn empty_successor_list_is_terminal() {
        assert!(!TaskKind::Pending.is_terminal());
        assert!(!TaskKind::Running.is_terminal());
        assert!(TaskKind::Done.is_terminal());
        assert!(Task::Done(Done { job: 1 }).is_terminal());
    }

    #[test]
    fn state_reports_kind_of_its_variant() {
        let state = Task::Running(Running {
            job: 7,
            worker: "w1".to_string(),
        });
        assert_eq!(state.kind(), TaskKind::Running);
        assert_eq!(state.name(), "Running");
    }

    #[test]
    fn payload_round_trips_through_its_variant() {
        let state = Pending { job: 3 }.into_state();
        assert_eq!(state, Task::Pending(Pending { job: 3 }));
        assert_eq!(Pending::peek(&state), Some(&Pending { job: 3 }));
        assert_eq!(Done::peek(&state), None);
        assert_eq!(<Running as Payload>::KIND, TaskKind::Running);
    }

    #[test]
    fn payload_converts_into_state() {
        let state: Task = Done { job: 9 }.into();
        assert_eq!(state.kind(), TaskKind::Done);
    }

    #[test]
    fn kind_serializes_by_variant_name() {
        let json = serde_json::to_string(&TaskKind::Running).unwrap();
        assert_eq!(json, "\"Running\"");
        let kind: TaskKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, TaskKind::Running);
    }
}
