//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, ScheduleRow, TickSummaryRow, TrainSnapshotRow};

/// A sink for the three output tables.
///
/// Errors are surfaced to the caller; [`WorldOutputObserver`][crate::WorldOutputObserver]
/// keeps the first one for retrieval after the run.
pub trait OutputWriter {
    /// Write one snapshot row per train.
    fn write_trains(&mut self, rows: &[TrainSnapshotRow]) -> OutputResult<()>;

    /// Write the predicted arrivals visible at a snapshot tick.
    fn write_schedules(&mut self, rows: &[ScheduleRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
