//! Block occupancy: which rail segments are currently under some train.
//!
//! The set is rebuilt from scratch once per tick, from every running train's
//! footprint, **before** any train looks ahead.  Each reservation remembers
//! which train made it so a train never blocks itself.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as HashMap;

use rt_core::{SegmentId, TrainId};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Reservation {
    first:  TrainId,
    /// More than one train holds this segment.
    shared: bool,
}

/// Per-tick snapshot of reserved segments.
#[derive(Clone, Debug, Default)]
pub struct BlockOccupancy {
    reserved: HashMap<SegmentId, Reservation>,
}

impl BlockOccupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `train` covers `segment`.
    pub fn reserve(&mut self, segment: SegmentId, train: TrainId) {
        self.reserved
            .entry(segment)
            .and_modify(|r| r.shared |= r.first != train)
            .or_insert(Reservation { first: train, shared: false });
    }

    pub fn reserve_all<I: IntoIterator<Item = SegmentId>>(&mut self, segments: I, train: TrainId) {
        for segment in segments {
            self.reserve(segment, train);
        }
    }

    /// `true` if any train reserves `segment`.
    #[inline]
    pub fn contains(&self, segment: SegmentId) -> bool {
        self.reserved.contains_key(&segment)
    }

    /// `true` if a train other than `train` reserves `segment`.
    #[inline]
    pub fn is_blocked_for(&self, segment: SegmentId, train: TrainId) -> bool {
        match self.reserved.get(&segment) {
            None => false,
            Some(r) => r.shared || r.first != train,
        }
    }

    pub fn len(&self) -> usize {
        self.reserved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reserved.is_empty()
    }

    pub fn clear(&mut self) {
        self.reserved.clear();
    }

    pub fn segments(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.reserved.keys().copied()
    }
}

/// Whether `segment` is reserved by a train other than `train`.
///
/// A missing occupancy context (a train that has not been deployed into a
/// world yet) is never blocked.
#[inline]
pub fn is_blocked(segment: SegmentId, train: TrainId, occupancy: Option<&BlockOccupancy>) -> bool {
    occupancy.is_some_and(|o| o.is_blocked_for(segment, train))
}
