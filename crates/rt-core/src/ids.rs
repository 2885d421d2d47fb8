//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  `TrainId` indexes the world's train
//! vector directly; the `u64` ids are opaque keys handed out by the map
//! editor (segment products, platform and siding bases, routes, stations).

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
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
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

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }
    };
}

typed_id! {
    /// Index of a train in the world's train vector.
    pub struct TrainId(u32);
}

typed_id! {
    /// Identifier of a physical rail piece.  Two trains on the same rail piece
    /// reserve the same `SegmentId`, which is what block occupancy keys on.
    pub struct SegmentId(u64);
}

typed_id! {
    /// Identifier of a siding (depot storage track) a train is parked on.
    pub struct SidingId(u64);
}

typed_id! {
    /// Identifier of a platform.  Schedule entries are keyed by platform.
    pub struct PlatformId(u64);
}

typed_id! {
    /// Identifier of a route (an ordered list of platforms).
    pub struct RouteId(u64);
}

typed_id! {
    /// Identifier of a station.
    pub struct StationId(u64);
}
