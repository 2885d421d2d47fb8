//! The `Train`: a per-tick state machine over an immutable path.

use rt_core::{RouteId, SegmentId, SidingId, TrainId};
use rt_dispatch::{CarPose, RiderChange, TickContext, TrainSpan};
use rt_track::{BlockOccupancy, Footprint, Path};
use tracing::{debug, trace};

use crate::{
    AdvanceOutcome, CarSpec, KinematicsSolver, MotionError, MotionParams, MotionResult,
    TrainCapabilities, TrainState,
};

/// A single train and everything that changes about it from tick to tick.
///
/// `progress`, `speed`, door and dwell state mutate only inside
/// [`advance`](Self::advance) and [`start_up`](Self::start_up).
#[derive(Clone, Debug)]
pub struct Train {
    pub id:            TrainId,
    pub siding:        SidingId,
    pub siding_length: f64,
    pub cars:          CarSpec,
    /// Routes this train serves, in order; used for destination lookup.
    pub route_ids:     Vec<RouteId>,

    path:            Path,
    params:          MotionParams,
    progress:        f64,
    speed:           f64,
    door_value:      f64,
    state:           TrainState,
    next_stop_index: usize,
    stop_counter:    f64,
    reversed:        bool,
}

impl Train {
    /// Create an idle train parked in the middle of its siding.
    pub fn new(
        id:            TrainId,
        siding:        SidingId,
        siding_length: f64,
        cars:          CarSpec,
        path:          Path,
        params:        MotionParams,
    ) -> MotionResult<Self> {
        if cars.car_count == 0 {
            return Err(MotionError::NoCars { train: id });
        }
        if !(cars.spacing.is_finite() && cars.spacing > 0.0) {
            return Err(MotionError::BadSpacing { train: id, spacing: cars.spacing });
        }
        if !(siding_length >= 0.0) {
            return Err(MotionError::BadSidingLength { train: id, length: siding_length });
        }

        let mut train = Self {
            id,
            siding,
            siding_length,
            cars,
            route_ids: Vec::new(),
            path,
            params,
            progress: 0.0,
            speed: 0.0,
            door_value: 0.0,
            state: TrainState::Idle,
            next_stop_index: 0,
            stop_counter: 0.0,
            reversed: false,
        };
        train.park();
        Ok(train)
    }

    pub fn with_routes(mut self, route_ids: Vec<RouteId>) -> Self {
        self.route_ids = route_ids;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn path(&self) -> &Path { &self.path }
    pub fn params(&self) -> &MotionParams { &self.params }
    pub fn progress(&self) -> f64 { self.progress }
    pub fn speed(&self) -> f64 { self.speed }
    pub fn door_value(&self) -> f64 { self.door_value }
    pub fn state(&self) -> TrainState { self.state }
    pub fn next_stop_index(&self) -> usize { self.next_stop_index }
    pub fn stop_counter(&self) -> f64 { self.stop_counter }
    pub fn reversed(&self) -> bool { self.reversed }

    #[inline]
    pub fn is_on_route(&self) -> bool {
        self.state.is_on_route()
    }

    pub fn solver(&self) -> KinematicsSolver {
        KinematicsSolver::from(&self.params)
    }

    /// Index of the segment under the head (a head exactly on a boundary
    /// belongs to the segment ending there).
    #[inline]
    pub fn head_index(&self) -> usize {
        self.path.index_at(self.progress, true)
    }

    pub fn footprint(&self) -> Footprint {
        self.path.footprint(self.progress, self.cars.body_length())
    }

    /// Dwell of segment `index` in ticks; zero if it is not a stop.
    pub fn dwell_ticks(&self, index: usize) -> f64 {
        self.path
            .segment(index)
            .map_or(0.0, |s| s.dwell_time as f64 * self.params.dwell_ticks_per_unit as f64)
    }

    /// Ticks left before the train may leave its current stop.
    ///
    /// Zero unless the train is stopped at its scheduled stop.
    pub fn dwell_ticks_remaining(&self) -> f64 {
        if self.state != TrainState::Stopped || !self.is_at_scheduled_stop() {
            return 0.0;
        }
        (self.dwell_ticks(self.next_stop_index) - self.stop_counter).max(0.0)
    }

    /// Progress of an idle train centred in its siding.
    pub fn parked_progress(&self) -> f64 {
        (self.siding_length + self.cars.body_length()) / 2.0
    }

    /// Progress at which the run is over and the train leaves service: the
    /// body centred in the final segment, or the end of the path for a short
    /// siding.
    pub fn end_progress(&self) -> f64 {
        let total = self.path.total_length();
        (total - (self.siding_length - self.cars.body_length()) / 2.0).min(total)
    }

    fn is_at_scheduled_stop(&self) -> bool {
        self.progress >= self.path.end_distance(self.next_stop_index)
    }

    // ── Deploy / start ────────────────────────────────────────────────────

    /// Whether the train may leave its siding this tick.
    ///
    /// A path needs at least two segments to be worth running; with fewer the
    /// dispatcher is not even asked.
    pub fn can_deploy<C: TrainCapabilities>(&self, caps: &mut C) -> bool {
        self.path.len() > 1 && caps.check_deploy_authorization(self.id, self.siding)
    }

    /// Begin a leg from rest.
    ///
    /// Resets the stop counter, gives the train its initial speed kick, and
    /// (when restarting the opposite way) moves the reference point to the
    /// other end of the body.  The next stopping index is found by scanning
    /// forward from the segment ahead of the head.
    pub fn start_up(&mut self, opposite: bool) {
        self.stop_counter = 0.0;
        self.speed = self.params.acceleration;
        if opposite {
            self.progress += self.cars.body_length();
            self.reversed = !self.reversed;
            self.state = TrainState::Reversing;
        } else {
            self.state = TrainState::Accelerating;
        }
        let from = self.path.index_at(self.progress, false);
        self.next_stop_index = self.path.next_stop_from(from);
    }

    /// Whether the segment at `check_index` is held by another train.
    ///
    /// Indices past the end of the path are never blocked.
    pub fn is_rail_blocked<C: TrainCapabilities>(&self, check_index: usize, caps: &C) -> bool {
        match self.path.segment(check_index) {
            Some(segment) => caps.check_blocked(self.id, segment.id),
            None => false,
        }
    }

    // ── Per-tick advance ──────────────────────────────────────────────────

    /// Advance the train by `ctx.ticks_elapsed` ticks.
    pub fn advance<C: TrainCapabilities>(
        &mut self,
        ctx:  &TickContext<'_>,
        caps: &mut C,
    ) -> AdvanceOutcome {
        let old_stop = self.next_stop_index;
        let dt = ctx.ticks_elapsed;
        let mut riders = RiderChange::default();

        if self.state == TrainState::Idle {
            self.park();
            if self.can_deploy(caps) && !self.is_rail_blocked(self.head_index() + 1, caps) {
                debug!(train = %self.id, siding = %self.siding, tick = %ctx.tick, "deploying");
                self.start(false, caps);
            }
        } else if self.progress >= self.end_progress() {
            riders.alighted += caps.on_retire(self.id);
            debug!(train = %self.id, tick = %ctx.tick, "end of path, returning to idle");
            self.state = TrainState::Idle;
            self.door_value = 0.0;
            self.park();
        } else if self.speed <= 0.0 {
            self.dwell(dt, caps);
        } else {
            self.run(dt, ctx, caps);
        }

        if self.state.is_on_route() {
            riders = riders.merge(self.report_cars(caps));
        }

        AdvanceOutcome {
            state_changed: old_stop != self.next_stop_index || !riders.is_empty(),
            riders,
            state: self.state,
        }
    }

    /// Segments this train holds against others: its footprint minus the
    /// first path segment and its own siding.
    pub fn reserved_segments(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.path.reserved_segments(self.footprint(), self.siding)
    }

    /// Reserve every segment under this train in `occupancy`.
    pub fn write_positions(&self, occupancy: &mut BlockOccupancy) {
        occupancy.reserve_all(self.reserved_segments(), self.id);
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn park(&mut self) {
        self.progress = self.parked_progress();
        self.speed = 0.0;
        self.reversed = false;
        self.stop_counter = 0.0;
        self.next_stop_index = self.path.next_stop_from(self.path.index_at(self.progress, false));
    }

    fn start<C: TrainCapabilities>(&mut self, opposite: bool, caps: &mut C) {
        self.start_up(opposite);
        caps.on_start(self.id, self.reversed);
    }

    /// Speed is zero: count dwell, work the doors, and restart when allowed.
    fn dwell<C: TrainCapabilities>(&mut self, dt: f64, caps: &mut C) {
        self.speed = 0.0;
        self.state = TrainState::Stopped;

        let at_stop = self.is_at_scheduled_stop();
        let dwell = if at_stop { self.dwell_ticks(self.next_stop_index) } else { 0.0 };
        self.stop_counter += dt;

        let door_open = at_stop && dwell - self.stop_counter > self.params.door_move_ticks;
        self.move_doors(door_open, dt);

        let opposite = at_stop
            && self.path.segment(self.next_stop_index).is_some_and(|s| s.turn_back);
        let check = self.head_index() + if opposite { 2 } else { 1 };

        if self.stop_counter >= dwell && self.door_value <= 0.0 {
            if self.is_rail_blocked(check, caps) {
                trace!(train = %self.id, check, "held at blocked boundary");
            } else {
                self.start(opposite, caps);
            }
        }
    }

    /// Speed is positive: choose a new speed and move, clamped at the boundary.
    fn run<C: TrainCapabilities>(&mut self, dt: f64, ctx: &TickContext<'_>, caps: &mut C) {
        let a = self.params.acceleration;
        let head = self.head_index();

        let mut boundary = self.path.end_distance(self.next_stop_index);
        if self.is_rail_blocked(head + 1, caps) {
            boundary = boundary.min(self.path.end_distance(head));
        }

        let stopping_distance = boundary - self.progress;
        let v = self.speed;

        if stopping_distance < 0.5 * v * v / a {
            self.speed = if stopping_distance <= 0.0 {
                a
            } else {
                (v - (0.5 * v * v / stopping_distance) * dt).max(a)
            };
            self.state = TrainState::Stopping;
        } else {
            let limit = self.target_speed(head, dt);
            if v < limit {
                self.speed = (v + a * dt).min(limit);
                self.state = TrainState::Accelerating;
            } else {
                self.speed = (v - a * dt).max(limit);
                self.state = TrainState::Running;
            }
        }

        // Never carry more than the next segment's limit across its entry.
        let entry = self.path.end_distance(head);
        if self.progress + self.speed * dt > entry {
            if let Some(next) = self.path.segment(head + 1) {
                self.speed = self.speed.min(next.speed_limit);
            }
        }

        self.progress += self.speed * dt;
        self.move_doors(false, dt);

        if self.progress >= boundary {
            self.progress = boundary;
            self.speed = 0.0;
            self.stop_counter = 0.0;
            self.state = TrainState::Stopped;
            debug!(
                train = %self.id,
                tick = %ctx.tick,
                index = self.path.index_at(boundary, true),
                scheduled = self.is_at_scheduled_stop(),
                "stopped"
            );
        }
    }

    /// Limit of the segment under the head, lowered early enough to enter a
    /// slower next segment at its limit.
    ///
    /// Braking at `a` starts one step before the continuous braking distance
    /// runs out; stepping at `a·dt` covers less ground than that distance.
    fn target_speed(&self, head: usize, dt: f64) -> f64 {
        let a = self.params.acceleration;
        let here = self.path.speed_limit(self.path.index_at(self.progress, false));
        match self.path.segment(head + 1) {
            Some(next) if next.speed_limit < self.speed => {
                let to_boundary = self.path.end_distance(head) - self.progress;
                let needed = (self.speed * self.speed - next.speed_limit * next.speed_limit) / (2.0 * a);
                if needed + self.speed * dt >= to_boundary {
                    here.min(next.speed_limit)
                } else {
                    here
                }
            }
            _ => here,
        }
    }

    fn move_doors(&mut self, open: bool, dt: f64) {
        let step = dt / self.params.door_move_ticks;
        self.door_value = if open {
            (self.door_value + step).min(1.0)
        } else {
            (self.door_value - step).max(0.0)
        };
    }

    fn report_cars<C: TrainCapabilities>(&self, caps: &mut C) -> RiderChange {
        let spacing = self.cars.spacing;
        let mut riders = RiderChange::default();

        for car in 0..self.cars.car_count {
            let head_progress = self.progress - car as f64 * spacing;
            let pose = CarPose {
                train: self.id,
                car,
                head_progress,
                tail_progress: head_progress - spacing,
                segment_index: self.path.index_at(head_progress - spacing / 2.0, false),
                half_width: self.cars.width / 2.0,
                half_spacing: spacing / 2.0,
                door_value: self.door_value,
            };
            riders = riders.merge(caps.advance_car(&pose));
        }

        let footprint = self.footprint();
        caps.report_positions(&TrainSpan {
            train:         self.id,
            head_progress: self.progress,
            tail_progress: self.progress - self.cars.body_length(),
            head_index:    footprint.head,
            tail_index:    footprint.tail,
        });
        riders
    }
}
