//! Plain data row types written by output backends.

use rt_core::Tick;
use rt_motion::Train;
use rt_schedule::ScheduleEntry;

/// One train's motion state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainSnapshotRow {
    pub train:           u32,
    pub tick:            u64,
    pub state:           &'static str,
    pub progress:        f64,
    pub speed:           f64,
    /// Path index of the segment under the front of the train.
    pub head_index:      usize,
    pub next_stop_index: usize,
    pub door_value:      f64,
    pub reversed:        bool,
}

impl TrainSnapshotRow {
    pub fn capture(tick: Tick, train: &Train) -> Self {
        Self {
            train:           train.id.0,
            tick:            tick.0,
            state:           train.state().as_str(),
            progress:        train.progress(),
            speed:           train.speed(),
            head_index:      train.head_index(),
            next_stop_index: train.next_stop_index(),
            door_value:      train.door_value(),
            reversed:        train.reversed(),
        }
    }
}

/// One predicted arrival as seen at a snapshot tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub tick:             u64,
    pub platform:         u64,
    pub train:            u32,
    pub arrival_millis:   i64,
    pub departure_millis: i64,
    pub train_type:       String,
    pub train_length:     u32,
    pub destination:      String,
    pub is_terminal:      bool,
}

impl ScheduleRow {
    pub fn capture(tick: Tick, entry: &ScheduleEntry) -> Self {
        Self {
            tick:             tick.0,
            platform:         entry.platform.0,
            train:            entry.train.0,
            arrival_millis:   entry.arrival_millis,
            departure_millis: entry.departure_millis,
            train_type:       entry.train_type.clone(),
            train_length:     entry.train_length,
            destination:      entry.destination.clone(),
            is_terminal:      entry.is_terminal,
        }
    }
}

/// Counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:              u64,
    pub unix_millis:       i64,
    pub trains_on_route:   u64,
    pub state_changes:     u64,
    pub boarded:           u32,
    pub alighted:          u32,
    pub reserved_segments: u64,
    pub schedule_entries:  u64,
}
