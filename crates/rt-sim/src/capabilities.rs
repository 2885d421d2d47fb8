//! The production [`TrainCapabilities`]: dispatcher, passenger registry, and
//! this tick's occupancy snapshot.

use rt_core::{SegmentId, SidingId, TrainId};
use rt_dispatch::{CarPose, Dispatch, PassengerRegistry, RiderChange, TickContext, TrainSpan};
use rt_motion::TrainCapabilities;
use rt_track::{BlockOccupancy, is_blocked};
use tracing::debug;

/// What one train sees of the world while it advances.
///
/// Built fresh for each train in the advance pass; the occupancy reference
/// is the snapshot taken before any train moved this tick.
pub struct WorldCapabilities<'w, D: Dispatch, R: PassengerRegistry> {
    dispatch:  &'w mut D,
    riders:    &'w mut R,
    occupancy: Option<&'w BlockOccupancy>,
}

impl<'w, D: Dispatch, R: PassengerRegistry> WorldCapabilities<'w, D, R> {
    pub fn new(ctx: &TickContext<'w>, dispatch: &'w mut D, riders: &'w mut R) -> Self {
        Self { dispatch, riders, occupancy: ctx.occupancy }
    }
}

impl<D: Dispatch, R: PassengerRegistry> TrainCapabilities for WorldCapabilities<'_, D, R> {
    #[inline]
    fn advance_car(&mut self, pose: &CarPose) -> RiderChange {
        self.riders.on_car(pose)
    }

    #[inline]
    fn report_positions(&mut self, span: &TrainSpan) {
        self.riders.on_span(span);
    }

    fn on_start(&mut self, train: TrainId, reversed: bool) {
        debug!(%train, reversed, "start-up");
        self.dispatch.acknowledge_deploy(train);
    }

    fn check_deploy_authorization(&mut self, train: TrainId, siding: SidingId) -> bool {
        self.dispatch.request_deploy(siding, train);
        self.dispatch.is_deploy_authorized(train)
    }

    /// Fail-open without a snapshot; a train never blocks itself.
    #[inline]
    fn check_blocked(&self, train: TrainId, segment: SegmentId) -> bool {
        is_blocked(segment, train, self.occupancy)
    }

    fn on_retire(&mut self, train: TrainId) -> u32 {
        self.riders.release_all(train)
    }
}
