//! `rt-sim`: tick loop orchestrator for the railtick simulator.
//!
//! # Two-pass tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Dispatch  : dispatcher.on_tick(now) grants this tick's deployments.
//!   ② Occupancy : clear, then reserve every train's footprint
//!                  (parallel with the `parallel` feature).
//!   ③ Advance   : for each train in ascending TrainId order:
//!                    advance against the occupancy snapshot
//!                    propagate predictions into the schedule store
//!                    (offset 0 on route, dispatcher offset when idle)
//! ```
//!
//! Every train sees the occupancy written in ②, never a half-updated set,
//! so the processing order in ③ does not change who is blocked.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Builds the occupancy snapshot on Rayon's thread pool.  |
//! | `fx-hash`  | FxHash for the occupancy set.                          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rt_core::SimConfig;
//! use rt_dispatch::{IntervalDispatch, NoRiders};
//! use rt_schedule::{InMemoryDirectory, RouteLabelPolicy};
//! use rt_sim::{NoopObserver, WorldBuilder};
//!
//! let dispatch = IntervalDispatch::new(1_200, Tick(0))?;
//! let mut builder = WorldBuilder::new(config, dispatch, NoRiders, directory, RouteLabelPolicy::default());
//! builder.spawn(siding, 80.0, cars, path, routes)?;
//! let mut world = builder.build()?;
//! world.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod capabilities;
pub mod error;
pub mod observer;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::WorldBuilder;
pub use capabilities::WorldCapabilities;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, TickSummary, WorldObserver};
pub use world::World;
