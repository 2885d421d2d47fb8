//! `rt-output`: simulation output writers for the railtick simulator.
//!
//! | Backend | Files created                                                          |
//! |---------|------------------------------------------------------------------------|
//! | CSV     | `schedule_entries.csv`, `train_snapshots.csv`, `tick_summaries.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`WorldOutputObserver`], which implements `rt_sim::WorldObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rt_output::{CsvWriter, WorldOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = WorldOutputObserver::new(writer, &config);
//! world.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::WorldOutputObserver;
pub use row::{ScheduleRow, TickSummaryRow, TrainSnapshotRow};
pub use writer::OutputWriter;
