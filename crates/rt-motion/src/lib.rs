//! `rt-motion`: how a train moves along its path, one tick at a time.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                      |
//! |------------------|---------------------------------------------------------------|
//! | [`kinematics`]   | `KinematicsSolver`, `SegmentMotion`: closed-form segment times |
//! | [`params`]       | `MotionParams`, `CarSpec`                                     |
//! | [`state`]        | `TrainState`, `AdvanceOutcome`                                |
//! | [`capabilities`] | `TrainCapabilities`: the train's view of the outside world   |
//! | [`train`]        | `Train`: the per-tick state machine                          |
//! | [`error`]        | `MotionError`, `MotionResult<T>`                              |
//!
//! # Motion model
//!
//! A single acceleration magnitude `a` governs speeding up and braking.  Each
//! tick the train either dwells (speed 0, counting down its stop), or picks a
//! new speed from its stopping boundary and the head segment's limit and
//! moves `speed · dt` along the path, clamped at the boundary.
//!
//! The stopping boundary is the end of the next stop segment, pulled back to
//! the end of the current head segment whenever the segment ahead is
//! reserved by another train.

pub mod capabilities;
pub mod error;
pub mod kinematics;
pub mod params;
pub mod state;
pub mod train;


pub use capabilities::TrainCapabilities;
pub use error::{MotionError, MotionResult};
pub use kinematics::{KinematicsSolver, SegmentMotion};
pub use params::{CarSpec, MotionParams};
pub use state::{AdvanceOutcome, TrainState};
pub use train::Train;
