//! The `World` struct and its tick loop.

use rt_core::{SimClock, SimConfig, Tick};
use rt_dispatch::{Dispatch, NoRiders, PassengerRegistry, TickContext};
use rt_motion::Train;
use rt_schedule::{
    InMemoryDirectory, LabelPolicy, RouteDirectory, RouteLabelPolicy, SchedulePropagator,
    ScheduleStore,
};
use rt_track::BlockOccupancy;
use tracing::{debug, info, info_span};

use crate::{SimResult, TickSummary, WorldCapabilities, WorldObserver};

// ── World ─────────────────────────────────────────────────────────────────────

/// Every train plus the collaborators they consult, driven one tick at a time.
///
/// # Two-pass tick
///
/// 1. **Occupancy** (optionally parallel with the `parallel` feature): the
///    reserved-segment set is rebuilt from every train's footprint.  No
///    train moves during this pass, so every train sees the same snapshot.
/// 2. **Advance** (sequential, ascending `TrainId` for determinism): each
///    train advances against the snapshot through [`WorldCapabilities`],
///    then re-predicts its remaining stops into [`ScheduleStore`].
///
/// Create via [`WorldBuilder`][crate::WorldBuilder].
pub struct World<
    D: Dispatch,
    R: PassengerRegistry = NoRiders,
    Dir: RouteDirectory = InMemoryDirectory,
    L: LabelPolicy = RouteLabelPolicy,
> {
    /// Global configuration (total ticks, tick length, motion constants, …).
    pub config: SimConfig,

    /// Simulation clock; tracks the current tick and maps to wall time.
    pub clock: SimClock,

    /// All trains, indexed by `TrainId`.
    pub trains: Vec<Train>,

    /// This tick's reserved segments.  Rebuilt at the start of every tick.
    pub occupancy: BlockOccupancy,

    /// This tick's predictions, per platform.  Cleared at the start of every
    /// tick.
    pub schedules: ScheduleStore,

    pub dispatch:  D,
    pub riders:    R,
    pub directory: Dir,
    pub labels:    L,
}

impl<D, R, Dir, L> World<D, R, Dir, L>
where
    D: Dispatch,
    R: PassengerRegistry,
    Dir: RouteDirectory,
    L: LabelPolicy,
{
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: WorldObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let span = info_span!("world_run", trains = self.trains.len(), end = %self.config.end_tick());
        let _enter = span.enter();

        let mut changes = 0usize;
        while self.clock.current_tick < self.config.end_tick() {
            changes += self.step(observer).state_changes;
        }
        observer.on_sim_end(self.clock.current_tick);

        info!(
            final_tick = %self.clock.current_tick,
            changes,
            on_route = self.trains.iter().filter(|t| t.is_on_route()).count(),
            "run complete"
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: WorldObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    /// Trains currently out of their siding.
    pub fn trains_on_route(&self) -> impl Iterator<Item = &Train> {
        self.trains.iter().filter(|t| t.is_on_route())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: WorldObserver>(&mut self, observer: &mut O) -> TickSummary {
        let now = self.clock.current_tick;

        observer.on_tick_start(now);
        let summary = self.process_tick(now);
        observer.on_tick_end(&summary);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.trains, &self.schedules);
        }

        self.clock.advance();
        summary
    }

    fn process_tick(&mut self, now: Tick) -> TickSummary {
        self.dispatch.on_tick(now);
        self.schedules.clear();

        // ── Pass 1: occupancy snapshot ────────────────────────────────────
        rebuild_occupancy(&self.trains, &mut self.occupancy);

        // ── Pass 2: advance and predict ───────────────────────────────────
        //
        // Explicit field borrows so the borrow checker sees disjoint access.
        let occupancy  = &self.occupancy;
        let clock      = &self.clock;
        let dispatch   = &mut self.dispatch;
        let riders     = &mut self.riders;
        let schedules  = &mut self.schedules;
        let propagator = SchedulePropagator::new(&self.directory, &self.labels, clock);

        let ctx = TickContext::new(
            now,
            clock.now_millis(),
            self.config.ticks_elapsed_per_step,
            Some(occupancy),
        );

        let mut summary = TickSummary {
            tick: now,
            reserved_segments: occupancy.len(),
            ..TickSummary::default()
        };

        for train in self.trains.iter_mut() {
            let outcome = {
                let mut caps = WorldCapabilities::new(&ctx, &mut *dispatch, &mut *riders);
                train.advance(&ctx, &mut caps)
            };

            summary.state_changes += outcome.state_changed as usize;
            summary.boarded += outcome.riders.boarded;
            summary.alighted += outcome.riders.alighted;

            let offset = if train.is_on_route() {
                summary.trains_on_route += 1;
                Some(0)
            } else {
                dispatch.next_departure_ticks(train.siding, now)
            };

            // No planned departure for an idle train: nothing to predict.
            if let Some(offset) = offset {
                summary.schedule_entries += propagator.propagate_into(train, offset, schedules);
            }
        }

        debug!(
            tick = %now,
            on_route = summary.trains_on_route,
            reserved = summary.reserved_segments,
            entries = summary.schedule_entries,
            "tick processed"
        );
        summary
    }
}

// ── Occupancy pass ────────────────────────────────────────────────────────────

/// Rebuild `occupancy` from every train's footprint.
///
/// With the `parallel` feature the per-train segment lists are collected on
/// Rayon's thread pool and merged sequentially; the result does not depend
/// on merge order.
fn rebuild_occupancy(trains: &[Train], occupancy: &mut BlockOccupancy) {
    occupancy.clear();

    #[cfg(not(feature = "parallel"))]
    {
        for train in trains {
            train.write_positions(occupancy);
        }
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        let reserved: Vec<(rt_core::TrainId, Vec<rt_core::SegmentId>)> = trains
            .par_iter()
            .map(|t| (t.id, t.reserved_segments().collect()))
            .collect();
        for (train, segments) in reserved {
            occupancy.reserve_all(segments, train);
        }
    }
}
