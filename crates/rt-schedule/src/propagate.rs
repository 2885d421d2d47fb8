//! Forward arrival/departure prediction for one train.
//!
//! # Algorithm
//!
//! Starting at the head segment with the train's current progress and speed,
//! every remaining segment is solved in closed form and its time added to a
//! running tick clock seeded with the dispatch offset:
//!
//! ```text
//! clock  = offset
//! for seg in head..end:
//!     (t, v) = solve(seg, progress_in_seg, v, must_stop)
//!     if seg has dwell:
//!         arrival   = now + (clock + t) · ms_per_tick
//!         remaining = dwell − (stop_counter if seg is the current stop)
//!         departure = arrival + remaining · ms_per_tick
//!         t += remaining
//!     clock += t; progress_in_seg = 0
//! ```
//!
//! Only dwell segments on a platform with a resolvable terminal produce a
//! [`ScheduleEntry`].  The clock is advanced for every segment regardless,
//! so later predictions never run earlier than earlier ones.

use rt_core::SimClock;
use rt_motion::Train;
use tracing::trace;

use crate::{LabelPolicy, RouteDirectory, ScheduleEntry, ScheduleStore};

/// Pure prediction over a route directory and a label policy.
///
/// Timestamps are taken relative to `clock.now_millis()`.
pub struct SchedulePropagator<'a, D: RouteDirectory, L: LabelPolicy> {
    directory: &'a D,
    labels:    &'a L,
    clock:     &'a SimClock,
}

impl<'a, D: RouteDirectory, L: LabelPolicy> SchedulePropagator<'a, D, L> {
    pub fn new(directory: &'a D, labels: &'a L, clock: &'a SimClock) -> Self {
        Self { directory, labels, clock }
    }

    /// Predict every remaining stop of `train`.
    ///
    /// `ticks_offset` is the delay before the train starts moving: zero for a
    /// train already on its route, the ticks until the next departure slot
    /// for an idle one.  Reads the train only.
    pub fn propagate(&self, train: &Train, ticks_offset: u64) -> Vec<ScheduleEntry> {
        let mut entries = Vec::new();
        self.for_each_entry(train, ticks_offset, |e| entries.push(e));
        entries
    }

    /// Like [`propagate`](Self::propagate) but inserts straight into `store`.
    pub fn propagate_into(
        &self,
        train:        &Train,
        ticks_offset: u64,
        store:        &mut ScheduleStore,
    ) -> usize {
        let mut n = 0;
        self.for_each_entry(train, ticks_offset, |e| {
            store.insert(e);
            n += 1;
        });
        n
    }

    fn for_each_entry(
        &self,
        train:        &Train,
        ticks_offset: u64,
        mut emit:     impl FnMut(ScheduleEntry),
    ) {
        let path = train.path();
        if path.is_empty() {
            return;
        }

        let now_millis = self.clock.now_millis();
        let solver = train.solver();
        let head = train.head_index();
        let current_stop = train.next_stop_index();

        let mut clock = ticks_offset as f64;
        let mut speed = train.speed();
        let mut progress_in_segment = train.progress() - path.start_distance(head);

        for (index, segment) in path.segments().iter().enumerate().skip(head) {
            let must_stop = segment.is_stop() || index == current_stop;
            let motion = solver.solve_segment(
                segment.speed_limit,
                segment.length,
                progress_in_segment,
                speed,
                must_stop,
            );
            let mut ticks = motion.ticks;

            if segment.is_stop() {
                let elapsed = if index == current_stop { train.stop_counter() } else { 0.0 };
                let remaining = (train.dwell_ticks(index) - elapsed).max(0.0);

                if let Some(platform) = segment.base.platform() {
                    let arrival = self.clock.millis_after(now_millis, clock + ticks);
                    match self.directory.stop_context(&train.route_ids, segment.stop_index) {
                        Some(ctx) => match ctx.last_station {
                            Some(terminal) => emit(ScheduleEntry {
                                arrival_millis:   arrival,
                                departure_millis: self.clock.millis_after(arrival, remaining),
                                train:            train.id,
                                train_type:       train.cars.name.clone(),
                                train_length:     train.cars.car_count,
                                platform,
                                destination:      self.labels.destination(ctx.this_route, terminal),
                                is_terminal:      ctx.is_terminal(),
                            }),
                            None => trace!(train = %train.id, %platform, "no terminal; entry skipped"),
                        },
                        None => trace!(
                            train = %train.id,
                            %platform,
                            stop_index = segment.stop_index,
                            "stop not on any route; entry skipped"
                        ),
                    }
                }
                ticks += remaining;
            }

            clock += ticks;
            speed = motion.exit_speed;
            progress_in_segment = 0.0;
        }
    }
}
