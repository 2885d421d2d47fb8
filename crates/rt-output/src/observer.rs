//! `WorldOutputObserver<W>`: bridges `WorldObserver` to an `OutputWriter`.

use rt_core::{SimConfig, Tick};
use rt_motion::Train;
use rt_schedule::ScheduleStore;
use rt_sim::{TickSummary, WorldObserver};
use tracing::warn;

use crate::row::{ScheduleRow, TickSummaryRow, TrainSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`WorldObserver`] that writes tick summaries every tick, and train
/// snapshots plus schedule predictions at snapshot ticks, to any
/// [`OutputWriter`].
///
/// Errors from the writer are stored internally because `WorldObserver`
/// methods have no return value.  After `world.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct WorldOutputObserver<W: OutputWriter> {
    writer:            W,
    start_unix_millis: i64,
    millis_per_tick:   u32,
    last_error:        Option<OutputError>,
}

impl<W: OutputWriter> WorldOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for wall-clock
    /// conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            start_unix_millis: config.start_unix_millis,
            millis_per_tick:   config.millis_per_tick,
            last_error:        None,
        }
    }

    /// Take the stored write error (if any) after `world.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn unix_millis(&self, tick: Tick) -> i64 {
        self.start_unix_millis + tick.0 as i64 * self.millis_per_tick as i64
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed; later errors are dropped");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> WorldObserver for WorldOutputObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        let row = TickSummaryRow {
            tick:              summary.tick.0,
            unix_millis:       self.unix_millis(summary.tick),
            trains_on_route:   summary.trains_on_route as u64,
            state_changes:     summary.state_changes as u64,
            boarded:           summary.boarded,
            alighted:          summary.alighted,
            reserved_segments: summary.reserved_segments as u64,
            schedule_entries:  summary.schedule_entries as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, trains: &[Train], schedules: &ScheduleStore) {
        if !trains.is_empty() {
            let rows: Vec<TrainSnapshotRow> =
                trains.iter().map(|t| TrainSnapshotRow::capture(tick, t)).collect();
            let result = self.writer.write_trains(&rows);
            self.store_err(result);
        }

        if !schedules.is_empty() {
            let rows: Vec<ScheduleRow> =
                schedules.iter().map(|e| ScheduleRow::capture(tick, e)).collect();
            let result = self.writer.write_schedules(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
