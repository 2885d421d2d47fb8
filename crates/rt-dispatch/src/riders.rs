//! The passenger registry: who is riding which train.
//!
//! Proximity detection and network delivery live outside the core.  The
//! train only reports car geometry and reacts to the counts that come back.

use rt_core::TrainId;

use crate::{CarPose, TrainSpan};

/// Riders that got on or off a car during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RiderChange {
    pub boarded:  u32,
    pub alighted: u32,
}

impl RiderChange {
    pub fn merge(self, other: RiderChange) -> RiderChange {
        RiderChange {
            boarded:  self.boarded + other.boarded,
            alighted: self.alighted + other.alighted,
        }
    }

    pub fn is_empty(self) -> bool {
        self.boarded == 0 && self.alighted == 0
    }
}

/// External registry of riders, consulted once per car per tick.
///
/// All methods have no-op defaults.
pub trait PassengerRegistry {
    /// Inspect one car's pose and report boardings/alightings.
    fn on_car(&mut self, _pose: &CarPose) -> RiderChange {
        RiderChange::default()
    }

    /// The whole train's extent, for observers tracking nearby trains.
    fn on_span(&mut self, _span: &TrainSpan) {}

    /// The train has left service; drop every rider.  Returns how many.
    fn release_all(&mut self, _train: TrainId) -> u32 {
        0
    }
}

/// A registry with no riders at all.
pub struct NoRiders;

impl PassengerRegistry for NoRiders {}
