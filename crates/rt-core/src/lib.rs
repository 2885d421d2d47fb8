//! `rt-core`: foundational types for the `railtick` train-motion simulator.
//!
//! This crate is a dependency of every other `rt-*` crate.  It has no `rt-*`
//! dependencies and a single required external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`ids`]     | `SegmentId`, `TrainId`, `SidingId`, `PlatformId`, `RouteId`, `StationId` |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`                               |
//! | [`error`]   | `RtError`, `RtResult`                                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{RtError, RtResult};
pub use ids::{PlatformId, RouteId, SegmentId, SidingId, StationId, TrainId};
pub use time::{SimClock, SimConfig, Tick};

// ── Motion constants ──────────────────────────────────────────────────────────

/// Default acceleration (and braking) magnitude, in length units per tick².
pub const ACCELERATION: f64 = 0.01;

/// Wall-clock milliseconds represented by one simulation tick (20 ticks/s).
pub const MILLIS_PER_TICK: u32 = 50;

/// Simulation ticks per unit of segment dwell time.
///
/// Dwell times are authored in half-second units, so one unit is 10 ticks.
pub const DWELL_TICKS_PER_UNIT: u32 = 10;

/// Ticks a door takes to move from fully closed to fully open.
pub const DOOR_MOVE_TICKS: f64 = 64.0;
