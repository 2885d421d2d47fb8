//! A single piece of rail on a train's path.

use rt_core::{PlatformId, SegmentId, SidingId};

/// What the rail piece is attached to, if anything.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RailBase {
    /// Plain running line.
    #[default]
    None,
    /// A platform; stopping here produces schedule entries.
    Platform(PlatformId),
    /// A depot siding; trains are parked here while idle.
    Siding(SidingId),
}

impl RailBase {
    pub fn platform(self) -> Option<PlatformId> {
        match self {
            RailBase::Platform(p) => Some(p),
            _ => None,
        }
    }

    pub fn siding(self) -> Option<SidingId> {
        match self {
            RailBase::Siding(s) => Some(s),
            _ => None,
        }
    }
}

/// One atomic piece of a path.
///
/// `speed_limit` is in length units per tick.  `dwell_time` is in authored
/// dwell units (see `rt_core::DWELL_TICKS_PER_UNIT`); zero means the train
/// does not stop here.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub id:          SegmentId,
    pub length:      f64,
    pub speed_limit: f64,
    pub dwell_time:  u32,
    pub base:        RailBase,
    /// 1-based position of this stop in the train's route sequence; 0 if the
    /// segment is not a scheduled stop.
    pub stop_index:  u32,
    /// Leaving this segment means running back the way the train came.
    pub turn_back:   bool,
}

impl Segment {
    /// A plain running segment with no stop, base, or reversal.
    pub fn new(id: impl Into<SegmentId>, length: f64, speed_limit: f64) -> Self {
        Self {
            id: id.into(),
            length,
            speed_limit,
            dwell_time: 0,
            base: RailBase::None,
            stop_index: 0,
            turn_back: false,
        }
    }

    /// Mark as a platform stop with the given dwell and route stop index.
    pub fn at_platform(mut self, platform: PlatformId, stop_index: u32, dwell_time: u32) -> Self {
        self.base = RailBase::Platform(platform);
        self.stop_index = stop_index;
        self.dwell_time = dwell_time;
        self
    }

    /// Mark as (part of) a depot siding.
    pub fn in_siding(mut self, siding: SidingId) -> Self {
        self.base = RailBase::Siding(siding);
        self
    }

    pub fn with_dwell(mut self, dwell_time: u32) -> Self {
        self.dwell_time = dwell_time;
        self
    }

    pub fn turning_back(mut self) -> Self {
        self.turn_back = true;
        self
    }

    #[inline]
    pub fn is_stop(&self) -> bool {
        self.dwell_time > 0
    }
}
