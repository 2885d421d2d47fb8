//! `rt-schedule`: predicted arrivals and departures for every platform.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`entry`]       | `ScheduleEntry`, `ScheduleStore` (per-platform `BTreeSet`) |
//! | [`propagate`]   | `SchedulePropagator`: walks a train's remaining path      |
//! | [`directory`]   | `RouteDirectory` trait, `InMemoryDirectory`, `StopContext` |
//! | [`label`]       | `LabelPolicy` trait, `RouteLabelPolicy`, `PlainLabelPolicy` |
//! | [`loader`]      | `load_directory_csv`, `load_directory_readers`             |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! # Prediction model (summary)
//!
//! Each tick every train re-predicts all of its remaining stops from its
//! freshly advanced state.  Predictions are never patched; the store is
//! cleared and refilled, so a stale entry can live for one tick at most.

pub mod directory;
pub mod entry;
pub mod error;
pub mod label;
pub mod loader;
pub mod propagate;


pub use directory::{InMemoryDirectory, Route, RouteDirectory, Station, StopContext};
pub use entry::{ScheduleEntry, ScheduleStore};
pub use error::{ScheduleError, ScheduleResult};
pub use label::{LabelPolicy, PlainLabelPolicy, RouteLabelPolicy};
pub use loader::{load_directory_csv, load_directory_readers};
pub use propagate::SchedulePropagator;
