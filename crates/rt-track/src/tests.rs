//! Unit tests for rt-track.
//!
//! All tests use hand-built paths so nothing depends on map data.

#[cfg(test)]
mod helpers {
    use rt_core::{PlatformId, SidingId};

    use crate::{Path, PathBuilder, Segment};

    /// Siding (100) → line (200) → platform (50, dwell 20) → line (300) → siding (100).
    ///
    /// End distances: 100, 300, 350, 650, 750.
    pub fn depot_loop() -> Path {
        let mut b = PathBuilder::new();
        b.push(Segment::new(1, 100.0, 0.5).in_siding(SidingId(9)));
        b.push(Segment::new(2, 200.0, 1.0));
        b.push(Segment::new(3, 50.0, 0.6).at_platform(PlatformId(30), 1, 20));
        b.push(Segment::new(4, 300.0, 1.0));
        b.push(Segment::new(5, 100.0, 0.5).in_siding(SidingId(9)));
        b.build().unwrap()
    }
}

#[cfg(test)]
mod builder {
    use crate::{PathBuilder, Segment, TrackError};

    #[test]
    fn empty_path_rejected() {
        assert!(matches!(PathBuilder::new().build(), Err(TrackError::EmptyPath)));
    }

    #[test]
    fn zero_length_rejected() {
        let mut b = PathBuilder::new();
        b.push(Segment::new(1, 10.0, 1.0));
        b.push(Segment::new(2, 0.0, 1.0));
        match b.build() {
            Err(TrackError::BadLength { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected BadLength, got {other:?}"),
        }
    }

    #[test]
    fn zero_speed_limit_rejected() {
        let mut b = PathBuilder::new();
        b.push(Segment::new(1, 10.0, 0.0));
        assert!(matches!(b.build(), Err(TrackError::BadSpeedLimit { .. })));
    }

    #[test]
    fn distances_accumulate() {
        let path = super::helpers::depot_loop();
        assert_eq!(path.len(), 5);
        assert_eq!(path.end_distance(0), 100.0);
        assert_eq!(path.end_distance(2), 350.0);
        assert_eq!(path.start_distance(0), 0.0);
        assert_eq!(path.start_distance(3), 350.0);
        assert_eq!(path.total_length(), 750.0);
        // Past the end clamps.
        assert_eq!(path.end_distance(99), 750.0);
    }
}

#[cfg(test)]
mod indexing {
    use super::helpers::depot_loop;
    use crate::Path;

    #[test]
    fn index_inside_segments() {
        let path = depot_loop();
        assert_eq!(path.index_at(0.0, false), 0);
        assert_eq!(path.index_at(150.0, false), 1);
        assert_eq!(path.index_at(349.9, true), 2);
    }

    #[test]
    fn boundary_rounding() {
        let path = depot_loop();
        assert_eq!(path.index_at(300.0, false), 2);
        assert_eq!(path.index_at(300.0, true), 1);
    }

    #[test]
    fn past_end_maps_to_last() {
        let path = depot_loop();
        assert_eq!(path.index_at(10_000.0, false), 4);
        assert_eq!(Path::empty().index_at(5.0, false), 0);
    }

    #[test]
    fn next_stop_scan() {
        let path = depot_loop();
        assert_eq!(path.next_stop_from(0), 2);
        assert_eq!(path.next_stop_from(2), 2);
        // No stop after index 3: defaults to the path end.
        assert_eq!(path.next_stop_from(3), 4);
    }

    #[test]
    fn speed_limit_out_of_range_is_zero() {
        let path = depot_loop();
        assert_eq!(path.speed_limit(1), 1.0);
        assert_eq!(path.speed_limit(42), 0.0);
    }
}

#[cfg(test)]
mod footprint {
    use rt_core::{SegmentId, SidingId};

    use super::helpers::depot_loop;

    #[test]
    fn footprint_spans_body() {
        let path = depot_loop();
        // Head at 320 (platform), body 60 long → tail at 260 (line seg 1).
        let fp = path.footprint(320.0, 60.0);
        assert_eq!(fp.head, 2);
        assert_eq!(fp.tail, 1);
    }

    #[test]
    fn own_siding_and_first_segment_skipped() {
        let path = depot_loop();
        // Train straddling the first siding and the line.
        let fp = path.footprint(150.0, 80.0);
        let ids: Vec<SegmentId> = path.reserved_segments(fp, SidingId(9)).collect();
        assert_eq!(ids, vec![SegmentId(2)]);

        // Arriving in the end siding: own siding excluded, another siding is not.
        let fp = path.footprint(700.0, 80.0);
        let own: Vec<SegmentId> = path.reserved_segments(fp, SidingId(9)).collect();
        assert_eq!(own, vec![SegmentId(4)]);
        let other: Vec<SegmentId> = path.reserved_segments(fp, SidingId(1)).collect();
        assert_eq!(other, vec![SegmentId(4), SegmentId(5)]);
    }
}

#[cfg(test)]
mod occupancy {
    use rt_core::{SegmentId, TrainId};

    use crate::{BlockOccupancy, is_blocked};

    #[test]
    fn missing_context_is_open() {
        assert!(!is_blocked(SegmentId(1), TrainId(0), None));
    }

    #[test]
    fn lookup_is_idempotent() {
        let mut occ = BlockOccupancy::new();
        occ.reserve(SegmentId(4), TrainId(0));
        let first = is_blocked(SegmentId(4), TrainId(1), Some(&occ));
        let second = is_blocked(SegmentId(4), TrainId(1), Some(&occ));
        assert!(first);
        assert_eq!(first, second);
        assert!(!is_blocked(SegmentId(5), TrainId(1), Some(&occ)));
    }

    #[test]
    fn lookup_ignores_the_asking_train() {
        let mut occ = BlockOccupancy::new();
        occ.reserve(SegmentId(4), TrainId(0));
        assert!(!is_blocked(SegmentId(4), TrainId(0), Some(&occ)));

        occ.reserve(SegmentId(4), TrainId(2));
        assert!(is_blocked(SegmentId(4), TrainId(0), Some(&occ)));
    }

    #[test]
    fn own_reservation_never_blocks() {
        let mut occ = BlockOccupancy::new();
        occ.reserve_all([SegmentId(1), SegmentId(2)], TrainId(3));
        assert!(!occ.is_blocked_for(SegmentId(2), TrainId(3)));
        assert!(occ.is_blocked_for(SegmentId(2), TrainId(4)));
    }

    #[test]
    fn shared_segment_blocks_both() {
        let mut occ = BlockOccupancy::new();
        occ.reserve(SegmentId(7), TrainId(0));
        occ.reserve(SegmentId(7), TrainId(0));
        assert!(!occ.is_blocked_for(SegmentId(7), TrainId(0)));
        occ.reserve(SegmentId(7), TrainId(1));
        assert!(occ.is_blocked_for(SegmentId(7), TrainId(0)));
        assert!(occ.is_blocked_for(SegmentId(7), TrainId(1)));
        assert_eq!(occ.len(), 1);
    }

    #[test]
    fn clear_empties() {
        let mut occ = BlockOccupancy::new();
        occ.reserve(SegmentId(1), TrainId(0));
        occ.clear();
        assert!(occ.is_empty());
    }
}
