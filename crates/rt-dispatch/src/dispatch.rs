//! The `Dispatch` trait: the depot side of deploying trains.
//!
//! A parked train asks its dispatcher for permission to leave every tick it
//! is idle.  The dispatcher grants permission on its own schedule; the train
//! starts the first tick it sees the grant and its way out is clear, then
//! acknowledges so the grant is not reused.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use rt_core::{SidingId, Tick, TrainId};
use tracing::debug;

use crate::{DispatchError, DispatchResult};

/// Deploy coordination consumed by the train state machine and the world.
pub trait Dispatch {
    /// A parked train on `siding` asks to be sent out.
    fn request_deploy(&mut self, siding: SidingId, train: TrainId);

    /// Whether `train` currently holds a deploy grant.
    fn is_deploy_authorized(&self, train: TrainId) -> bool;

    /// `train` has started; its grant is spent.
    fn acknowledge_deploy(&mut self, train: TrainId);

    /// Ticks until the next departure from `siding`.
    ///
    /// `None` means no departure is planned; idle trains on that siding get
    /// no predicted schedule.
    fn next_departure_ticks(&self, siding: SidingId, now: Tick) -> Option<u64>;

    /// Called by the world at the start of every tick, before any train moves.
    fn on_tick(&mut self, _now: Tick) {}
}

// ── ManualDispatch ────────────────────────────────────────────────────────────

/// A dispatcher driven entirely by explicit calls.
///
/// Useful in tests and for hosts that toggle authorization from their own
/// signal handling.
#[derive(Debug, Default)]
pub struct ManualDispatch {
    authorized: HashSet<TrainId>,
    requests:   Vec<(SidingId, TrainId)>,
    departures: HashMap<SidingId, u64>,
}

impl ManualDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `train` permission to deploy.
    pub fn authorize(&mut self, train: TrainId) {
        self.authorized.insert(train);
    }

    pub fn revoke(&mut self, train: TrainId) {
        self.authorized.remove(&train);
    }

    /// Fix the departure offset reported for `siding`.
    pub fn set_next_departure(&mut self, siding: SidingId, ticks: u64) {
        self.departures.insert(siding, ticks);
    }

    /// Distinct deploy requests received so far, in arrival order.
    pub fn requests(&self) -> &[(SidingId, TrainId)] {
        &self.requests
    }
}

impl Dispatch for ManualDispatch {
    fn request_deploy(&mut self, siding: SidingId, train: TrainId) {
        if !self.requests.contains(&(siding, train)) {
            self.requests.push((siding, train));
        }
    }

    fn is_deploy_authorized(&self, train: TrainId) -> bool {
        self.authorized.contains(&train)
    }

    fn acknowledge_deploy(&mut self, train: TrainId) {
        self.authorized.remove(&train);
        self.requests.retain(|&(_, t)| t != train);
    }

    fn next_departure_ticks(&self, siding: SidingId, _now: Tick) -> Option<u64> {
        self.departures.get(&siding).copied()
    }
}

// ── IntervalDispatch ──────────────────────────────────────────────────────────

/// Sends one waiting train out of each siding every `interval_ticks`,
/// starting at `first_departure`.
#[derive(Debug)]
pub struct IntervalDispatch {
    interval_ticks:  u64,
    first_departure: Tick,
    waiting:         BTreeMap<SidingId, VecDeque<TrainId>>,
    authorized:      HashSet<TrainId>,
}

impl IntervalDispatch {
    pub fn new(interval_ticks: u64, first_departure: Tick) -> DispatchResult<Self> {
        if interval_ticks == 0 {
            return Err(DispatchError::Config("interval_ticks must be > 0".into()));
        }
        Ok(Self {
            interval_ticks,
            first_departure,
            waiting: BTreeMap::new(),
            authorized: HashSet::new(),
        })
    }

    fn is_departure_tick(&self, now: Tick) -> bool {
        now >= self.first_departure && (now - self.first_departure) % self.interval_ticks == 0
    }

    /// Trains queued on `siding`, front first.
    pub fn waiting(&self, siding: SidingId) -> impl Iterator<Item = TrainId> + '_ {
        self.waiting.get(&siding).into_iter().flatten().copied()
    }
}

impl Dispatch for IntervalDispatch {
    fn request_deploy(&mut self, siding: SidingId, train: TrainId) {
        if self.authorized.contains(&train) {
            return;
        }
        let queue = self.waiting.entry(siding).or_default();
        if !queue.contains(&train) {
            queue.push_back(train);
        }
    }

    fn is_deploy_authorized(&self, train: TrainId) -> bool {
        self.authorized.contains(&train)
    }

    fn acknowledge_deploy(&mut self, train: TrainId) {
        self.authorized.remove(&train);
    }

    fn next_departure_ticks(&self, _siding: SidingId, now: Tick) -> Option<u64> {
        if now < self.first_departure {
            return Some(self.first_departure - now);
        }
        let into_cycle = (now - self.first_departure) % self.interval_ticks;
        Some(if into_cycle == 0 { 0 } else { self.interval_ticks - into_cycle })
    }

    fn on_tick(&mut self, now: Tick) {
        if !self.is_departure_tick(now) {
            return;
        }
        for (siding, queue) in self.waiting.iter_mut() {
            if let Some(train) = queue.pop_front() {
                debug!(%siding, %train, tick = %now, "deploy authorized");
                self.authorized.insert(train);
            }
        }
    }
}
