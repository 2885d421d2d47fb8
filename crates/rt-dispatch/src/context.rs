//! Read-only simulation state passed into every train advance.

use rt_core::{Tick, TrainId};
use rt_track::BlockOccupancy;

/// A read-only snapshot of one simulation tick.
///
/// Built once per tick by the world driver **after** the occupancy set has
/// been rebuilt from every train's footprint, and shared immutably by all
/// train advances in that tick.
#[derive(Copy, Clone, Debug)]
pub struct TickContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    /// Wall-clock milliseconds at `tick`; predictions are offsets from here.
    pub now_millis: i64,

    /// Ticks of motion to integrate in this step.
    pub ticks_elapsed: f64,

    /// This tick's reservations, or `None` outside a world (fail-open).
    pub occupancy: Option<&'a BlockOccupancy>,
}

impl<'a> TickContext<'a> {
    #[inline]
    pub fn new(
        tick:          Tick,
        now_millis:    i64,
        ticks_elapsed: f64,
        occupancy:     Option<&'a BlockOccupancy>,
    ) -> Self {
        Self { tick, now_millis, ticks_elapsed, occupancy }
    }

    /// Context with no occupancy, for driving a lone train.
    pub fn detached(tick: Tick, now_millis: i64, ticks_elapsed: f64) -> Self {
        Self::new(tick, now_millis, ticks_elapsed, None)
    }
}

/// Instantaneous geometry of one car, as seen by a passenger registry.
///
/// Positions are along the path axis; `half_width`/`half_spacing` describe
/// the car body box a rider must stand in to be counted aboard.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CarPose {
    pub train:         TrainId,
    pub car:           u32,
    pub head_progress: f64,
    pub tail_progress: f64,
    pub segment_index: usize,
    pub half_width:    f64,
    pub half_spacing:  f64,
    /// 0 = closed, 1 = fully open.
    pub door_value:    f64,
}

impl CarPose {
    #[inline]
    pub fn doors_open(&self) -> bool {
        self.door_value > 0.0
    }

    #[inline]
    pub fn centre_progress(&self) -> f64 {
        (self.head_progress + self.tail_progress) / 2.0
    }
}

/// Head-to-tail extent of a whole train after this tick's move.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrainSpan {
    pub train:         TrainId,
    pub head_progress: f64,
    pub tail_progress: f64,
    pub head_index:    usize,
    pub tail_index:    usize,
}
