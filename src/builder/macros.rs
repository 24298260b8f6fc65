//! Macros for declaring state machines.

/// Declare a state machine: its states, their payloads and the transition
/// table.
///
/// Each entry names a variant, the payload struct it carries, and the payload
/// structs of the states it may transition into. The macro generates:
///
/// - the state enum (deriving `Debug`; add further derives as attributes),
/// - a `Copy` kind enum deriving `serde::Serialize` and `serde::Deserialize`
///   and displaying as the variant name,
/// - `State`, `Kind` and `Payload` implementations,
/// - an `Edge` implementation for every declared transition,
/// - `From<Payload>` for the state enum.
///
/// Every payload type must be distinct, since a payload identifies its kind.
/// The calling crate needs `serde` (with `derive`) among its dependencies.
/// The state enum must be at least as visible as its payload types, since
/// each payload names the enum as its `Payload::State`.
///
/// # Example
///
/// ```
/// use fsm_store::core::{Kind, State};
/// use fsm_store::machine;
///
/// #[derive(Debug, Clone)]
/// pub struct Idle {
///     pub addr: String,
/// }
///
/// #[derive(Debug, Clone)]
/// pub struct Connected {
///     pub addr: String,
///     pub session: u64,
/// }
///
/// machine! {
///     #[derive(Clone)]
///     pub enum Link: LinkKind {
///         Idle(Idle) => [Connected],
///         Connected(Connected) => [Idle],
///     }
/// }
///
/// let state = Link::Idle(Idle { addr: "ws://h".to_string() });
/// assert_eq!(state.kind(), LinkKind::Idle);
/// assert_eq!(LinkKind::Idle.successors(), &[LinkKind::Connected]);
/// ```
#[macro_export]
macro_rules! machine {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident ( $payload:ty ) => [ $($succ:ty),* $(,)? ]
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant($payload)
            ),*
        }

        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $kind {
            $($variant),*
        }

        impl ::std::fmt::Display for $kind {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::Kind::name(self))
            }
        }

        impl $crate::core::Kind for $kind {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn all() -> &'static [Self] {
                &[$(Self::$variant),*]
            }

            fn successors(&self) -> &'static [Self] {
                match self {
                    $(Self::$variant => {
                        const SUCCESSORS: &[$kind] =
                            &[$(<$succ as $crate::core::Payload>::KIND),*];
                        SUCCESSORS
                    }),*
                }
            }
        }

        impl $crate::core::State for $name {
            type Kind = $kind;

            fn kind(&self) -> $kind {
                match self {
                    $(Self::$variant(_) => $kind::$variant),*
                }
            }
        }

        $(
            impl $crate::core::Payload for $payload {
                type State = $name;

                const KIND: $kind = $kind::$variant;

                fn into_state(self) -> $name {
                    $name::$variant(self)
                }

                #[allow(unreachable_patterns)]
                fn peek(state: &$name) -> Option<&Self> {
                    match state {
                        $name::$variant(payload) => Some(payload),
                        _ => None,
                    }
                }
            }

            impl ::std::convert::From<$payload> for $name {
                fn from(payload: $payload) -> Self {
                    $name::$variant(payload)
                }
            }

            $(
                impl $crate::core::Edge<$succ> for $payload {}
            )*
        )*
    };
}
