//! CSV route directory loader.
//!
//! # CSV format
//!
//! Two files.  Platforms, one row each:
//!
//! ```csv
//! platform_id,station_id,station_name
//! 30,1,Central
//! 31,2,Harbour|Airport
//! ```
//!
//! Routes, with the served platforms in running order separated by spaces:
//!
//! ```csv
//! route_id,name,light_rail,route_number,platform_ids
//! 7,Harbour Line,false,,30 31
//! 8,Airport Light Rail,true,507,31 30
//! ```
//!
//! A route that names a platform absent from the platform file is rejected.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use rt_core::{PlatformId, RouteId, StationId};

use crate::{InMemoryDirectory, Route, ScheduleError, Station};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PlatformRecord {
    platform_id:  u64,
    station_id:   u64,
    station_name: String,
}

#[derive(Deserialize)]
struct RouteRecord {
    route_id:     u64,
    name:         String,
    light_rail:   bool,
    #[serde(default)]
    route_number: String,
    platform_ids: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a directory from a platform file and a route file.
pub fn load_directory_csv(
    platforms: &Path,
    routes:    &Path,
) -> Result<InMemoryDirectory, ScheduleError> {
    let platforms = std::fs::File::open(platforms).map_err(ScheduleError::Io)?;
    let routes = std::fs::File::open(routes).map_err(ScheduleError::Io)?;
    load_directory_readers(platforms, routes)
}

/// Like [`load_directory_csv`] but accepts any `Read` sources.
pub fn load_directory_readers<P: Read, R: Read>(
    platforms: P,
    routes:    R,
) -> Result<InMemoryDirectory, ScheduleError> {
    let mut directory = InMemoryDirectory::new();

    // ── Platforms and their stations ──────────────────────────────────────
    for result in csv::Reader::from_reader(platforms).deserialize::<PlatformRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let station = StationId(row.station_id);
        if directory.station(station).is_none() {
            directory.add_station(Station { id: station, name: row.station_name });
        }
        directory.add_platform(PlatformId(row.platform_id), station);
    }

    // ── Routes ────────────────────────────────────────────────────────────
    for result in csv::Reader::from_reader(routes).deserialize::<RouteRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let platforms = parse_platforms(&row.platform_ids)?;

        if let Some(&missing) = platforms.iter().find(|&&p| !directory.has_platform(p)) {
            return Err(ScheduleError::UnknownPlatform { route: row.route_id, platform: missing.0 });
        }

        directory.add_route(Route {
            id:           RouteId(row.route_id),
            name:         row.name,
            light_rail:   row.light_rail,
            route_number: row.route_number,
            platforms,
        });
    }

    Ok(directory)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_platforms(s: &str) -> Result<Vec<PlatformId>, ScheduleError> {
    s.split_whitespace()
        .map(|n| {
            n.parse::<u64>().map(PlatformId).map_err(|_| {
                ScheduleError::Parse(format!("invalid platform id {n:?}: expected an integer"))
            })
        })
        .collect()
}
