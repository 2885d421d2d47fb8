//! Route and station lookup used to label predicted stops.
//!
//! A train serves a list of routes in order.  Its stops are numbered
//! consecutively across that list, so stop `n` (1-based, as carried on the
//! path segment) is found by walking the routes and subtracting each route's
//! platform count until the index falls inside one.

use std::collections::HashMap;

use rt_core::{PlatformId, RouteId, StationId};

#[derive(Clone, Debug, PartialEq)]
pub struct Station {
    pub id:   StationId,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub id:           RouteId,
    pub name:         String,
    /// Light-rail routes prefix destinations with their route number.
    pub light_rail:   bool,
    pub route_number: String,
    /// Platforms served, in running order.
    pub platforms:    Vec<PlatformId>,
}

/// Everything known about one stop of a train's route sequence.
#[derive(Clone, Copy, Debug)]
pub struct StopContext<'a> {
    pub this_route:   &'a Route,
    pub next_route:   Option<&'a Route>,
    pub this_station: Option<&'a Station>,
    pub next_station: Option<&'a Station>,
    /// Final station of `this_route`; the destination shown to passengers.
    pub last_station: Option<&'a Station>,
}

impl StopContext<'_> {
    /// No station follows this one on the current route.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.next_station.is_none()
    }
}

/// Read-only route/station lookup.
pub trait RouteDirectory: Send + Sync {
    /// Context for stop `stop_index` (1-based) of a train serving
    /// `route_ids`, or `None` if the index lies outside every route.
    fn stop_context(&self, route_ids: &[RouteId], stop_index: u32) -> Option<StopContext<'_>>;
}

// ── InMemoryDirectory ─────────────────────────────────────────────────────────

/// A directory held entirely in hash maps.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDirectory {
    routes:            HashMap<RouteId, Route>,
    stations:          HashMap<StationId, Station>,
    platform_stations: HashMap<PlatformId, StationId>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_station(&mut self, station: Station) -> &mut Self {
        self.stations.insert(station.id, station);
        self
    }

    /// Attach `platform` to `station`.  A platform belongs to one station.
    pub fn add_platform(&mut self, platform: PlatformId, station: StationId) -> &mut Self {
        self.platform_stations.insert(platform, station);
        self
    }

    pub fn add_route(&mut self, route: Route) -> &mut Self {
        self.routes.insert(route.id, route);
        self
    }

    pub fn route(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(&id)
    }

    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    pub fn has_platform(&self, platform: PlatformId) -> bool {
        self.platform_stations.contains_key(&platform)
    }

    pub fn station_of(&self, platform: PlatformId) -> Option<&Station> {
        self.platform_stations.get(&platform).and_then(|id| self.stations.get(id))
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }
}

impl RouteDirectory for InMemoryDirectory {
    fn stop_context(&self, route_ids: &[RouteId], stop_index: u32) -> Option<StopContext<'_>> {
        let mut remaining = (stop_index as usize).checked_sub(1)?;

        for (i, route) in route_ids.iter().filter_map(|id| self.routes.get(id)).enumerate() {
            let count = route.platforms.len();
            if remaining >= count {
                remaining -= count;
                continue;
            }

            let station_at = |k: usize| route.platforms.get(k).and_then(|&p| self.station_of(p));
            let next_route = route_ids
                .iter()
                .filter_map(|id| self.routes.get(id))
                .nth(i + 1);

            return Some(StopContext {
                this_route:   route,
                next_route,
                this_station: station_at(remaining),
                next_station: station_at(remaining + 1),
                last_station: station_at(count - 1),
            });
        }
        None
    }
}
