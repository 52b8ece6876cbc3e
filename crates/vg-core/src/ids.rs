//! Strongly typed, zero-cost identifier wrappers.
//!
//! Identities are owned by the host world; the core only keys auxiliary
//! tables by them.  All IDs are `Copy + Ord + Hash` so they work as map keys
//! and sort deterministically.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const NONE: $name = $name(<$inner>::MAX);

            /// `true` unless this is the [`NONE`](Self::NONE) sentinel.
            #[inline(always)]
            pub fn is_some(self) -> bool {
                self != Self::NONE
            }
        }

        impl Default for $name {
            /// Returns the `NONE` sentinel so uninitialized IDs are visibly unset.
            #[inline(always)]
            fn default() -> Self {
                Self::NONE
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }
    };
}

typed_id! {
    /// Stable host-assigned identity of an agent.
    pub struct AgentId(u32);
}

typed_id! {
    /// Identity of a corpse lying in the host world.
    pub struct CorpseId(u32);
}
