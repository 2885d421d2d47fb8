//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to wall-clock time is held in `SimClock`:
//!
//!   wall_millis = start_unix_millis + tick * millis_per_tick
//!
//! Motion inside a tick is continuous, so predictions are carried as `f64`
//! tick counts and only converted to wall-clock milliseconds when a schedule
//! entry is emitted ([`SimClock::millis_after`]).
//!
//! The default tick is 50 ms (20 ticks per second).

use std::fmt;

use crate::{RtError, RtResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and Unix wall-clock milliseconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (milliseconds since epoch) of tick 0.
    pub start_unix_millis: i64,
    /// How many real milliseconds one tick represents.  Default: 50.
    pub millis_per_tick: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock starting at `start_unix_millis` with the given resolution.
    pub fn new(start_unix_millis: i64, millis_per_tick: u32) -> Self {
        Self {
            start_unix_millis,
            millis_per_tick,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated milliseconds since tick 0.
    #[inline]
    pub fn elapsed_millis(&self) -> i64 {
        self.current_tick.0 as i64 * self.millis_per_tick as i64
    }

    /// Current Unix timestamp in milliseconds.
    #[inline]
    pub fn now_millis(&self) -> i64 {
        self.start_unix_millis + self.elapsed_millis()
    }

    /// Wall-clock timestamp `ticks` (possibly fractional) after `now_millis`.
    ///
    /// Fractions of a millisecond are truncated.
    #[inline]
    pub fn millis_after(&self, now_millis: i64, ticks: f64) -> i64 {
        now_millis + (ticks * self.millis_per_tick as f64) as i64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed_millis().max(0) / 1_000;
        write!(
            f,
            "{} ({:02}:{:02}:{:02})",
            self.current_tick,
            secs / 3_600,
            (secs % 3_600) / 60,
            secs % 60
        )
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the world builder.  Every field has a default (see [`SimConfig::default`]).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Unix timestamp (milliseconds) for tick 0.
    pub start_unix_millis: i64,

    /// Milliseconds per tick.  Default: 50.
    pub millis_per_tick: u32,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Ticks of motion integrated per simulation step.  The driver may run
    /// slower than real time and pass a larger value.  Default: 1.0.
    pub ticks_elapsed_per_step: f64,

    /// Acceleration and braking magnitude, fixed for the whole run.
    pub acceleration: f64,

    /// Ticks per authored dwell-time unit.  Default: 10.
    pub dwell_ticks_per_unit: u32,

    /// Ticks for a door to travel fully open or fully closed.
    pub door_move_ticks: f64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Emit snapshots every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_unix_millis:      0,
            millis_per_tick:        crate::MILLIS_PER_TICK,
            total_ticks:            0,
            ticks_elapsed_per_step: 1.0,
            acceleration:           crate::ACCELERATION,
            dwell_ticks_per_unit:   crate::DWELL_TICKS_PER_UNIT,
            door_move_ticks:        crate::DOOR_MOVE_TICKS,
            num_threads:            None,
            output_interval_ticks:  1,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_unix_millis, self.millis_per_tick)
    }

    /// Reject values the motion model cannot work with.
    pub fn validate(&self) -> RtResult<()> {
        if self.millis_per_tick == 0 {
            return Err(RtError::Config("millis_per_tick must be > 0".into()));
        }
        if !(self.acceleration.is_finite() && self.acceleration > 0.0) {
            return Err(RtError::Config(format!(
                "acceleration must be a positive finite number, got {}",
                self.acceleration
            )));
        }
        if !(self.ticks_elapsed_per_step.is_finite() && self.ticks_elapsed_per_step > 0.0) {
            return Err(RtError::Config(format!(
                "ticks_elapsed_per_step must be positive, got {}",
                self.ticks_elapsed_per_step
            )));
        }
        if !(self.door_move_ticks > 0.0) {
            return Err(RtError::Config("door_move_ticks must be > 0".into()));
        }
        Ok(())
    }
}
