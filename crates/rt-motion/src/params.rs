//! Motion parameters shared by every train in a world, and per-train car data.

use rt_core::SimConfig;

/// World-wide motion constants.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MotionParams {
    /// Acceleration and braking magnitude (length units per tick²).
    pub acceleration:         f64,
    /// Ticks per authored dwell unit.
    pub dwell_ticks_per_unit: u32,
    /// Ticks for doors to fully open or close.
    pub door_move_ticks:      f64,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            acceleration:         rt_core::ACCELERATION,
            dwell_ticks_per_unit: rt_core::DWELL_TICKS_PER_UNIT,
            door_move_ticks:      rt_core::DOOR_MOVE_TICKS,
        }
    }
}

impl From<&SimConfig> for MotionParams {
    fn from(config: &SimConfig) -> Self {
        Self {
            acceleration:         config.acceleration,
            dwell_ticks_per_unit: config.dwell_ticks_per_unit,
            door_move_ticks:      config.door_move_ticks,
        }
    }
}

/// The rolling stock a train is made of.
#[derive(Clone, Debug, PartialEq)]
pub struct CarSpec {
    /// Vehicle type name, carried into schedule entries.
    pub name:      String,
    pub car_count: u32,
    /// Length of one car along the path.
    pub spacing:   f64,
    pub width:     f64,
}

impl CarSpec {
    pub fn new(name: impl Into<String>, car_count: u32, spacing: f64, width: f64) -> Self {
        Self { name: name.into(), car_count, spacing, width }
    }

    /// Head-to-tail length of the whole train.
    #[inline]
    pub fn body_length(&self) -> f64 {
        self.car_count as f64 * self.spacing
    }
}
