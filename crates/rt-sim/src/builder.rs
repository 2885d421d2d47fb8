//! Fluent builder for constructing a [`World`].

use rt_core::{RouteId, SidingId, SimConfig, TrainId};
use rt_dispatch::{Dispatch, PassengerRegistry};
use rt_motion::{CarSpec, MotionParams, Train};
use rt_schedule::{LabelPolicy, RouteDirectory, ScheduleStore};
use rt_track::{BlockOccupancy, Path};

use crate::{SimError, SimResult, World};

/// Fluent builder for [`World<D, R, Dir, L>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, tick length, motion constants, …
/// - `D: Dispatch`: deploy authorization and departure offsets
/// - `R: PassengerRegistry`: use [`rt_dispatch::NoRiders`] for none
/// - `Dir: RouteDirectory` + `L: LabelPolicy`: destination labelling
///
/// # Adding trains
///
/// | Method           | Effect                                                 |
/// |------------------|--------------------------------------------------------|
/// | `.spawn(..)`     | Build a train with the world's motion parameters      |
/// | `.train(t)`      | Add a pre-built train; its id must equal its position |
///
/// # Example
///
/// ```rust,ignore
/// let mut builder = WorldBuilder::new(config, dispatch, NoRiders, directory, RouteLabelPolicy::default());
/// builder.spawn(SidingId(9), 80.0, cars, path, vec![RouteId(7)])?;
/// let mut world = builder.build()?;
/// world.run(&mut NoopObserver)?;
/// ```
pub struct WorldBuilder<D, R, Dir, L> {
    config:    SimConfig,
    params:    MotionParams,
    trains:    Vec<Train>,
    dispatch:  D,
    riders:    R,
    directory: Dir,
    labels:    L,
}

impl<D, R, Dir, L> WorldBuilder<D, R, Dir, L>
where
    D: Dispatch,
    R: PassengerRegistry,
    Dir: RouteDirectory,
    L: LabelPolicy,
{
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, dispatch: D, riders: R, directory: Dir, labels: L) -> Self {
        Self {
            params: MotionParams::from(&config),
            config,
            trains: Vec::new(),
            dispatch,
            riders,
            directory,
            labels,
        }
    }

    /// Motion parameters every train in this world runs with.
    pub fn params(&self) -> MotionParams {
        self.params
    }

    /// Construct the next train (id = current train count) parked in `siding`.
    pub fn spawn(
        &mut self,
        siding:        SidingId,
        siding_length: f64,
        cars:          CarSpec,
        path:          Path,
        route_ids:     Vec<RouteId>,
    ) -> SimResult<TrainId> {
        let id = TrainId(self.trains.len() as u32);
        let train = Train::new(id, siding, siding_length, cars, path, self.params)?
            .with_routes(route_ids);
        self.trains.push(train);
        Ok(id)
    }

    /// Add a pre-built train.  Checked in [`build`](Self::build).
    pub fn train(mut self, train: Train) -> Self {
        self.trains.push(train);
        self
    }

    /// Validate configuration and trains and return a ready-to-run [`World`].
    pub fn build(self) -> SimResult<World<D, R, Dir, L>> {
        self.config.validate()?;

        for (index, train) in self.trains.iter().enumerate() {
            if train.id.index() != index {
                return Err(SimError::TrainIdMismatch { index, id: train.id });
            }
            let got = train.params().acceleration;
            if got != self.params.acceleration {
                return Err(SimError::AccelerationMismatch {
                    train:    train.id,
                    expected: self.params.acceleration,
                    got,
                });
            }
        }

        Ok(World {
            clock:     self.config.make_clock(),
            config:    self.config,
            trains:    self.trains,
            occupancy: BlockOccupancy::new(),
            schedules: ScheduleStore::new(),
            dispatch:  self.dispatch,
            riders:    self.riders,
            directory: self.directory,
            labels:    self.labels,
        })
    }
}
