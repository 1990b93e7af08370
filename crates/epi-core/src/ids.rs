//! Strongly typed, zero-cost identifier wrappers.
//!
//! Agents and locations are addressed by opaque 64-bit uuids assigned at
//! population-synthesis time.  Unlike dense array indices, uuids are sparse:
//! the driver routes events through hash maps keyed by uuid, so the wrappers
//! derive `Ord + Hash` and nothing assumes contiguity.

use std::fmt;

/// Generate a typed uuid wrapper around a primitive integer.
macro_rules! typed_uuid {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid uuid" — equivalent to `i64::MIN`.
            ///
            /// Visit generators emit visits addressed to `INVALID`; the owning
            /// agent fills in its own uuid before publishing.
            pub const INVALID: $name = $name(<$inner>::MIN);

            /// `true` unless this is the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized uuids are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<i64> for $name {
            #[inline(always)]
            fn from(raw: i64) -> $name {
                $name(raw)
            }
        }
    };
}

typed_uuid! {
    /// Uuid of one agent in the simulated population.
    pub struct AgentUuid(i64);
}

typed_uuid! {
    /// Uuid of one location agents may visit.
    pub struct LocationUuid(i64);
}
