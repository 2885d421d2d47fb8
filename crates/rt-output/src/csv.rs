//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `schedule_entries.csv`
//! - `train_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use tracing::debug;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, ScheduleRow, TickSummaryRow, TrainSnapshotRow};

pub const SCHEDULE_HEADER: [&str; 9] = [
    "tick", "platform", "train", "arrival_millis", "departure_millis",
    "train_type", "train_length", "destination", "is_terminal",
];

pub const TRAIN_HEADER: [&str; 9] = [
    "train", "tick", "state", "progress", "speed",
    "head_index", "next_stop_index", "door_value", "reversed",
];

pub const SUMMARY_HEADER: [&str; 8] = [
    "tick", "unix_millis", "trains_on_route", "state_changes",
    "boarded", "alighted", "reserved_segments", "schedule_entries",
];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    schedules: Writer<File>,
    trains:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` and write the header rows.
    ///
    /// `dir` must already exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut schedules = Writer::from_path(dir.join("schedule_entries.csv"))?;
        schedules.write_record(SCHEDULE_HEADER)?;

        let mut trains = Writer::from_path(dir.join("train_snapshots.csv"))?;
        trains.write_record(TRAIN_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        debug!(dir = %dir.display(), "csv output opened");
        Ok(Self {
            schedules,
            trains,
            summaries,
            finished: false,
        })
    }

    fn ensure_open(&self) -> OutputResult<()> {
        if self.finished { Err(OutputError::Finished) } else { Ok(()) }
    }
}

impl OutputWriter for CsvWriter {
    fn write_trains(&mut self, rows: &[TrainSnapshotRow]) -> OutputResult<()> {
        self.ensure_open()?;
        for row in rows {
            self.trains.write_record(&[
                row.train.to_string(),
                row.tick.to_string(),
                row.state.to_owned(),
                format!("{:.3}", row.progress),
                format!("{:.4}", row.speed),
                row.head_index.to_string(),
                row.next_stop_index.to_string(),
                format!("{:.3}", row.door_value),
                (row.reversed as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_schedules(&mut self, rows: &[ScheduleRow]) -> OutputResult<()> {
        self.ensure_open()?;
        for row in rows {
            self.schedules.write_record(&[
                row.tick.to_string(),
                row.platform.to_string(),
                row.train.to_string(),
                row.arrival_millis.to_string(),
                row.departure_millis.to_string(),
                row.train_type.clone(),
                row.train_length.to_string(),
                row.destination.clone(),
                (row.is_terminal as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.ensure_open()?;
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unix_millis.to_string(),
            row.trains_on_route.to_string(),
            row.state_changes.to_string(),
            row.boarded.to_string(),
            row.alighted.to_string(),
            row.reserved_segments.to_string(),
            row.schedule_entries.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.schedules.flush()?;
        self.trains.flush()?;
        self.summaries.flush()?;
        debug!("csv output flushed");
        Ok(())
    }
}
