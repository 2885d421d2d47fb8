//! The `TrainCapabilities` trait: everything a train asks of its world.
//!
//! The train state machine is written against this interface only.  The
//! world crate provides the production implementation (occupancy snapshot,
//! dispatcher, passenger registry); tests use small doubles.

use rt_core::{SegmentId, SidingId, TrainId};
use rt_dispatch::{CarPose, RiderChange, TrainSpan};

pub trait TrainCapabilities {
    /// Report one car's pose; returns riders that boarded or alighted.
    fn advance_car(&mut self, pose: &CarPose) -> RiderChange;

    /// Report the whole train's extent after this tick's move.
    fn report_positions(&mut self, span: &TrainSpan);

    /// The train has just started a leg (deploy or dwell completion).
    fn on_start(&mut self, train: TrainId, reversed: bool);

    /// Ask the dispatcher for permission to leave `siding`.
    fn check_deploy_authorization(&mut self, train: TrainId, siding: SidingId) -> bool;

    /// Whether another train holds `segment` this tick.
    fn check_blocked(&self, train: TrainId, segment: SegmentId) -> bool;

    /// The train reached the end of its path and left service.  Returns the
    /// number of riders released.
    fn on_retire(&mut self, _train: TrainId) -> u32 {
        0
    }
}
