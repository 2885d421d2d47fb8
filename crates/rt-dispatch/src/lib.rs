//! `rt-dispatch`: what the motion core consumes from the outside world.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`context`]   | `TickContext<'a>`: read-only tick snapshot; `CarPose`, `TrainSpan` |
//! | [`dispatch`]  | `Dispatch` trait, `ManualDispatch`, `IntervalDispatch`          |
//! | [`riders`]    | `PassengerRegistry` trait, `RiderChange`, `NoRiders`            |
//! | [`error`]     | `DispatchError`, `DispatchResult<T>`                            |
//!
//! # Design notes
//!
//! Every input the core needs for a tick (occupancy, deploy authorization,
//! the next departure offset) is supplied synchronously by the world driver.
//! Nothing here blocks or performs I/O; authorization flags are toggled by
//! [`Dispatch::on_tick`] or by whoever owns the dispatcher between ticks.

pub mod context;
pub mod dispatch;
pub mod error;
pub mod riders;


pub use context::{CarPose, TickContext, TrainSpan};
pub use dispatch::{Dispatch, IntervalDispatch, ManualDispatch};
pub use error::{DispatchError, DispatchResult};
pub use riders::{NoRiders, PassengerRegistry, RiderChange};
