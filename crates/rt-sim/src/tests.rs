//! Integration tests for rt-sim.

use std::collections::HashMap;

use rt_core::{PlatformId, RouteId, SegmentId, SidingId, SimConfig, StationId, Tick, TrainId};
use rt_dispatch::{CarPose, ManualDispatch, NoRiders, PassengerRegistry, RiderChange};
use rt_motion::{CarSpec, TrainState};
use rt_schedule::{InMemoryDirectory, Route, RouteLabelPolicy, ScheduleStore, Station};
use rt_track::{Path, PathBuilder, Segment};

use crate::{NoopObserver, TickSummary, World, WorldBuilder, WorldObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

const SIDING: SidingId = SidingId(9);

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        start_unix_millis:     1_700_000_000_000,
        total_ticks,
        acceleration:          0.1,
        door_move_ticks:       4.0,
        num_threads:           Some(1),
        output_interval_ticks: 10,
        ..SimConfig::default()
    }
}

/// Siding (100) → line (200) → platform 30 (50, dwell `dwell`) → line (300)
/// → siding (100).  End distances: 100, 300, 350, 650, 750.
fn line(dwell: u32) -> Path {
    let mut b = PathBuilder::new();
    b.push(Segment::new(1, 100.0, 0.5).in_siding(SIDING));
    b.push(Segment::new(2, 200.0, 1.0));
    b.push(Segment::new(3, 50.0, 0.6).at_platform(PlatformId(30), 1, dwell));
    b.push(Segment::new(4, 300.0, 1.0));
    b.push(Segment::new(5, 100.0, 0.5).in_siding(SIDING));
    b.build().unwrap()
}

fn directory() -> InMemoryDirectory {
    let mut d = InMemoryDirectory::new();
    d.add_station(Station { id: StationId(1), name: "Central".into() })
        .add_platform(PlatformId(30), StationId(1))
        .add_route(Route {
            id:           RouteId(7),
            name:         "Harbour Line".into(),
            light_rail:   false,
            route_number: String::new(),
            platforms:    vec![PlatformId(30)],
        });
    d
}

fn world_with<R: PassengerRegistry>(
    trains:   usize,
    dwell:    u32,
    dispatch: ManualDispatch,
    riders:   R,
) -> World<ManualDispatch, R> {
    let mut b = WorldBuilder::new(test_config(1_000), dispatch, riders, directory(), RouteLabelPolicy::default());
    for _ in 0..trains {
        b.spawn(SIDING, 100.0, CarSpec::new("emu", 2, 20.0, 3.0), line(dwell), vec![RouteId(7)])
            .unwrap();
    }
    b.build().unwrap()
}

fn world(trains: usize, dwell: u32, dispatch: ManualDispatch) -> World<ManualDispatch> {
    world_with(trains, dwell, dispatch, NoRiders)
}

fn step<R: PassengerRegistry>(w: &mut World<ManualDispatch, R>) {
    w.run_ticks(1, &mut NoopObserver).unwrap();
}

// ── WorldBuilder validation ───────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use rt_motion::{MotionParams, Train};

    use crate::SimError;

    fn builder() -> WorldBuilder<ManualDispatch, NoRiders, InMemoryDirectory, RouteLabelPolicy> {
        WorldBuilder::new(test_config(10), ManualDispatch::new(), NoRiders, directory(), RouteLabelPolicy::default())
    }

    #[test]
    fn spawn_assigns_sequential_ids() {
        let mut b = builder();
        let a = b.spawn(SIDING, 100.0, CarSpec::new("emu", 2, 20.0, 3.0), line(20), vec![]).unwrap();
        let c = b.spawn(SIDING, 100.0, CarSpec::new("emu", 2, 20.0, 3.0), line(20), vec![]).unwrap();
        assert_eq!((a, c), (TrainId(0), TrainId(1)));

        let w = b.build().unwrap();
        assert_eq!(w.trains.len(), 2);
        assert_eq!(w.clock.current_tick, Tick(0));
        assert!(w.trains.iter().all(|t| t.state() == TrainState::Idle));
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = test_config(10);
        config.millis_per_tick = 0;
        let r = WorldBuilder::new(config, ManualDispatch::new(), NoRiders, directory(), RouteLabelPolicy::default())
            .build();
        assert!(matches!(r, Err(SimError::Config(_))));
    }

    #[test]
    fn bad_train_rejected_at_spawn() {
        let mut b = builder();
        let r = b.spawn(SIDING, 100.0, CarSpec::new("emu", 0, 20.0, 3.0), line(20), vec![]);
        assert!(matches!(r, Err(SimError::Motion(_))));
    }

    #[test]
    fn misplaced_train_id_rejected() {
        let params = builder().params();
        let t = Train::new(TrainId(5), SIDING, 100.0, CarSpec::new("emu", 2, 20.0, 3.0), line(20), params)
            .unwrap();
        match builder().train(t).build() {
            Err(SimError::TrainIdMismatch { index, id }) => assert_eq!((index, id), (0, TrainId(5))),
            Err(e) => panic!("expected TrainIdMismatch, got {e}"),
            Ok(_) => panic!("expected TrainIdMismatch"),
        }
    }

    #[test]
    fn foreign_acceleration_rejected() {
        let params = MotionParams { acceleration: 0.5, ..MotionParams::default() };
        let t = Train::new(TrainId(0), SIDING, 100.0, CarSpec::new("emu", 2, 20.0, 3.0), line(20), params)
            .unwrap();
        assert!(matches!(builder().train(t).build(), Err(SimError::AccelerationMismatch { .. })));
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_loop {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        starts:    u64,
        summaries: Vec<TickSummary>,
        snapshots: Vec<(Tick, usize)>,
        ended:     Option<Tick>,
    }

    impl WorldObserver for Recorder {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.starts += 1;
        }
        fn on_tick_end(&mut self, summary: &TickSummary) {
            self.summaries.push(*summary);
        }
        fn on_snapshot(&mut self, tick: Tick, _trains: &[rt_motion::Train], schedules: &ScheduleStore) {
            self.snapshots.push((tick, schedules.len()));
        }
        fn on_sim_end(&mut self, final_tick: Tick) {
            self.ended = Some(final_tick);
        }
    }

    #[test]
    fn run_calls_observer_hooks() {
        let mut w = world(1, 20, ManualDispatch::new());
        w.config.total_ticks = 100;
        let mut rec = Recorder::default();
        w.run(&mut rec).unwrap();

        assert_eq!(rec.starts, 100);
        assert_eq!(rec.summaries.len(), 100);
        assert_eq!(rec.snapshots.len(), 10);
        assert_eq!(rec.snapshots[1].0, Tick(10));
        assert_eq!(rec.ended, Some(Tick(100)));
        assert_eq!(w.clock.current_tick, Tick(100));
    }

    #[test]
    fn deploys_only_when_authorized() {
        let mut dispatch = ManualDispatch::new();
        dispatch.authorize(TrainId(1));
        let mut w = world(2, 20, dispatch);
        step(&mut w);

        assert_eq!(w.trains[0].state(), TrainState::Idle);
        assert!(w.trains[1].is_on_route());
        // The grant is spent on start-up.
        assert!(!rt_dispatch::Dispatch::is_deploy_authorized(&w.dispatch, TrainId(1)));
        assert_eq!(w.dispatch.requests(), &[(SIDING, TrainId(0))]);
    }

    #[test]
    fn follower_holds_behind_dwelling_leader() {
        let mut dispatch = ManualDispatch::new();
        dispatch.authorize(TrainId(0));
        // 200 units · 10 ticks: the leader stands for 2000 ticks.
        let mut w = world(2, 200, dispatch);

        while !(w.trains[0].progress() == 350.0 && w.trains[0].state() == TrainState::Stopped) {
            step(&mut w);
            assert!(w.clock.current_tick < Tick(5_000));
        }
        w.dispatch.authorize(TrainId(1));

        for _ in 0..1_500 {
            step(&mut w);
            assert!(w.trains[1].progress() <= 300.0);
        }
        assert_eq!(w.trains[0].progress(), 350.0);
        assert_eq!(w.trains[1].progress(), 300.0);
        assert_eq!(w.trains[1].speed(), 0.0);
        assert!(w.occupancy.is_blocked_for(SegmentId(3), TrainId(1)));
        assert!(!w.occupancy.is_blocked_for(SegmentId(3), TrainId(0)));
    }

    #[test]
    fn idle_trains_predict_only_with_a_departure() {
        let mut w = world(1, 20, ManualDispatch::new());
        step(&mut w);
        assert!(w.schedules.is_empty());

        w.dispatch.set_next_departure(SIDING, 100);
        step(&mut w);
        let entries: Vec<_> = w.schedules.for_platform(PlatformId(30)).collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].destination, "Central");
        assert!(entries[0].is_terminal);
        assert!(entries[0].arrival_millis >= w.clock.now_millis() + 100 * 50 - 50);
    }

    #[test]
    fn schedule_store_refilled_each_tick() {
        let mut dispatch = ManualDispatch::new();
        dispatch.authorize(TrainId(0));
        dispatch.set_next_departure(SIDING, 300);
        let mut w = world(2, 20, dispatch);
        let mut rec = Recorder::default();

        for _ in 0..50 {
            w.run_ticks(1, &mut rec).unwrap();
            let last = rec.summaries.last().unwrap();
            assert_eq!(last.schedule_entries, w.schedules.len());
            assert_eq!(w.schedules.len(), 2);
        }
        // The running train is due before the one still waiting for its slot.
        let due: Vec<TrainId> = w.schedules.for_platform(PlatformId(30)).map(|e| e.train).collect();
        assert_eq!(due, vec![TrainId(0), TrainId(1)]);
    }

    #[test]
    fn identical_worlds_stay_identical() {
        let make = || {
            let mut dispatch = ManualDispatch::new();
            dispatch.authorize(TrainId(0));
            world(2, 20, dispatch)
        };
        let (mut a, mut b) = (make(), make());
        for _ in 0..600 {
            step(&mut a);
            step(&mut b);
        }
        let snap = |w: &World<ManualDispatch>| {
            w.trains.iter().map(|t| (t.progress(), t.speed(), t.state())).collect::<Vec<_>>()
        };
        assert_eq!(snap(&a), snap(&b));
        assert_eq!(a.schedules.iter().collect::<Vec<_>>(), b.schedules.iter().collect::<Vec<_>>());
    }
}

// ── Riders ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod riders {
    use super::*;

    /// One rider boards each open car per tick, up to `capacity` per train.
    struct Boarding {
        capacity: u32,
        aboard:   HashMap<TrainId, u32>,
    }

    impl PassengerRegistry for Boarding {
        fn on_car(&mut self, pose: &CarPose) -> RiderChange {
            let n = self.aboard.entry(pose.train).or_default();
            if pose.doors_open() && *n < self.capacity {
                *n += 1;
                RiderChange { boarded: 1, alighted: 0 }
            } else {
                RiderChange::default()
            }
        }

        fn release_all(&mut self, train: TrainId) -> u32 {
            self.aboard.remove(&train).unwrap_or(0)
        }
    }

    #[test]
    fn riders_board_at_stops_and_leave_at_the_end() {
        let mut dispatch = ManualDispatch::new();
        dispatch.authorize(TrainId(0));
        let riders = Boarding { capacity: 5, aboard: HashMap::new() };
        let mut w = world_with(1, 20, dispatch, riders);

        let mut boarded = 0;
        let mut alighted = 0;
        let mut left = false;
        for _ in 0..5_000 {
            let mut last = None;
            w.run_ticks(1, &mut LastSummary(&mut last)).unwrap();
            let s = last.unwrap();
            boarded += s.boarded;
            alighted += s.alighted;
            left |= s.trains_on_route > 0;
            if left && s.trains_on_route == 0 {
                break;
            }
        }
        assert_eq!(boarded, 5);
        assert_eq!(alighted, 5);
        assert!(w.riders.aboard.is_empty());
    }

    struct LastSummary<'a>(&'a mut Option<TickSummary>);

    impl WorldObserver for LastSummary<'_> {
        fn on_tick_end(&mut self, summary: &TickSummary) {
            *self.0 = Some(*summary);
        }
    }
}
