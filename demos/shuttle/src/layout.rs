//! Synthetic three-station shuttle line.
//!
//! ```text
//!  depot ─ West Pier ─── Central ─── East Gate ┐
//!  depot ─ West Pier ─── Central ──────────────┘  (turn back)
//! ```
//!
//! Trains leave the depot siding eastbound, call at three platforms, turn
//! back at East Gate, call at Central and West Pier again, and finish in the
//! depot.  The path is one list of segments; the turn-back flag on the East
//! Gate platform makes the train restart reversed.

use rt_core::{PlatformId, SidingId};
use rt_track::{Path, PathBuilder, Segment, TrackResult};

pub const DEPOT: SidingId = SidingId(1);
pub const DEPOT_LENGTH: f64 = 120.0;

/// Stations with one platform per direction.
pub const PLATFORMS_CSV: &str = "\
platform_id,station_id,station_name
11,1,West Pier
21,2,Central
31,3,East Gate
22,2,Central
12,1,West Pier
";

pub const ROUTES_CSV: &str = "\
route_id,name,light_rail,route_number,platform_ids
1,Shuttle Eastbound,false,,11 21 31
2,Shuttle Westbound,false,,22 12
";

/// Segment ids follow the distance from the depot; platforms dwell 3 units
/// (30 ticks at the default resolution), the terminus 12.
pub fn shuttle_path() -> TrackResult<Path> {
    let mut b = PathBuilder::with_capacity(13);
    b.push(Segment::new(100, DEPOT_LENGTH, 0.3).in_siding(DEPOT))
        .push(Segment::new(101, 400.0, 0.8))
        .push(Segment::new(102, 100.0, 0.5).at_platform(PlatformId(11), 1, 3))
        .push(Segment::new(103, 1_200.0, 1.5))
        .push(Segment::new(104, 100.0, 0.5).at_platform(PlatformId(21), 2, 3))
        .push(Segment::new(105, 900.0, 1.5))
        .push(Segment::new(106, 100.0, 0.5).at_platform(PlatformId(31), 3, 12).turning_back())
        .push(Segment::new(205, 1_000.0, 1.5))
        .push(Segment::new(204, 100.0, 0.5).at_platform(PlatformId(22), 4, 3))
        .push(Segment::new(203, 1_200.0, 1.5))
        .push(Segment::new(202, 100.0, 0.5).at_platform(PlatformId(12), 5, 3))
        .push(Segment::new(201, 400.0, 0.8))
        .push(Segment::new(200, DEPOT_LENGTH, 0.3).in_siding(DEPOT));
    b.build()
}
