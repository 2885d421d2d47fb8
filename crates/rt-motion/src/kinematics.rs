//! Closed-form time and exit speed for one segment.
//!
//! Every profile is built from at most three phases at the fixed magnitude
//! `a`: a speed change toward a target, a cruise at the target, and (when the
//! segment ends in a stop) a brake to zero.
//!
//! ```text
//!  v                      must_stop = true
//!  │     ┌──────────┐
//!  │    /            \            peak = min(limit, √(a·d + v0²/2))
//!  │ v0/              \
//!  │                   \
//!  └──────────────────────── x
//!     change   cruise   brake
//! ```
//!
//! A train entering above the target (overspeed) decelerates at `a` toward it
//! instead of producing a negative phase time.

use crate::MotionParams;

/// Elapsed time and exit speed for one segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentMotion {
    /// Ticks to cover the rest of the segment.
    pub ticks:      f64,
    /// Speed when leaving the segment.
    pub exit_speed: f64,
}

impl SegmentMotion {
    #[inline]
    pub fn new(ticks: f64, exit_speed: f64) -> Self {
        Self { ticks, exit_speed }
    }
}

/// Pure segment solver for a fixed acceleration magnitude.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KinematicsSolver {
    acceleration: f64,
}

impl Default for KinematicsSolver {
    fn default() -> Self {
        Self::new(rt_core::ACCELERATION)
    }
}

impl From<&MotionParams> for KinematicsSolver {
    fn from(params: &MotionParams) -> Self {
        Self::new(params.acceleration)
    }
}

impl KinematicsSolver {
    /// # Panics
    ///
    /// Panics in debug mode if `acceleration` is not strictly positive.
    pub fn new(acceleration: f64) -> Self {
        debug_assert!(acceleration > 0.0, "acceleration must be > 0");
        Self { acceleration }
    }

    #[inline]
    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    /// Distance needed to brake from `speed` to zero.
    #[inline]
    pub fn braking_distance(&self, speed: f64) -> f64 {
        speed * speed / (2.0 * self.acceleration)
    }

    /// Time and exit speed for the remainder of a segment.
    ///
    /// - `segment_length - progress_in_segment <= 0`: nothing left to cover;
    ///   returns `(0, initial_speed)` unchanged.
    /// - `must_stop`: the exit speed is exactly zero.
    /// - otherwise the train changes speed toward the limit and cruises.
    ///
    /// Speed limits below `a` are raised to `a`, the creep speed a train
    /// never brakes under while moving, so no branch divides by zero.
    pub fn solve_segment(
        &self,
        rail_speed_limit:    f64,
        segment_length:      f64,
        progress_in_segment: f64,
        initial_speed:       f64,
        must_stop:           bool,
    ) -> SegmentMotion {
        let distance = segment_length - progress_in_segment;
        if distance <= 0.0 {
            return SegmentMotion::new(0.0, initial_speed);
        }

        let a = self.acceleration;
        let v0 = initial_speed.max(0.0);
        let limit = rail_speed_limit.max(a);

        if must_stop {
            return self.solve_stop(limit, distance, v0);
        }

        if v0 > 0.0 && v0 == rail_speed_limit {
            return SegmentMotion::new(distance / v0, v0);
        }

        let change_distance = (limit * limit - v0 * v0).abs() / (2.0 * a);
        if change_distance > distance {
            // The limit is out of reach within this segment.
            let exit = if v0 < limit {
                (2.0 * a * distance + v0 * v0).sqrt()
            } else {
                (v0 * v0 - 2.0 * a * distance).max(0.0).sqrt()
            };
            return SegmentMotion::new((exit - v0).abs() / a, exit);
        }

        let change_ticks = (limit - v0).abs() / a;
        let cruise_ticks = (distance - change_distance) / limit;
        SegmentMotion::new(change_ticks + cruise_ticks, limit)
    }

    fn solve_stop(&self, limit: f64, distance: f64, v0: f64) -> SegmentMotion {
        let a = self.acceleration;

        // Already inside the braking curve: uniform deceleration to zero.
        if v0 > 0.0 && v0 * v0 / (2.0 * distance) >= a {
            return SegmentMotion::new(2.0 * distance / v0, 0.0);
        }

        // Peak of the accelerate-then-brake triangle, capped by the limit.
        // Strictly positive: distance > 0 and limit >= a > 0.
        let peak = limit.min((a * distance + v0 * v0 / 2.0).sqrt());

        let change_ticks = (peak - v0).abs() / a;
        let change_distance = (peak * peak - v0 * v0).abs() / (2.0 * a);
        let brake_ticks = peak / a;
        let brake_distance = peak * peak / (2.0 * a);
        let cruise_ticks = (distance - change_distance - brake_distance).max(0.0) / peak;

        SegmentMotion::new(change_ticks + cruise_ticks + brake_ticks, 0.0)
    }
}
