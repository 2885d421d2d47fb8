//! World observer trait for progress reporting and data collection.

use rt_core::Tick;
use rt_motion::Train;
use rt_schedule::ScheduleStore;

/// Counters for one processed tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:              Tick,
    /// Trains not parked in their siding after this tick.
    pub trains_on_route:   usize,
    /// Trains whose `advance` reported a state change.
    pub state_changes:     usize,
    pub boarded:           u32,
    pub alighted:          u32,
    /// Segments reserved in the occupancy snapshot this tick.
    pub reserved_segments: usize,
    pub schedule_entries:  usize,
}

/// Callbacks invoked by [`World::run`][crate::World::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl WorldObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.interval == 0 {
///             println!("{}: {} trains running", summary.tick, summary.trains_on_route);
///         }
///     }
/// }
/// ```
pub trait WorldObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with this tick's predictions and the trains that made them.
    fn on_snapshot(&mut self, _tick: Tick, _trains: &[Train], _schedules: &ScheduleStore) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`WorldObserver`] that does nothing.
pub struct NoopObserver;

impl WorldObserver for NoopObserver {}
