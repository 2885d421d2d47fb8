//! A train's path and the distance bookkeeping along it.
//!
//! # Data layout
//!
//! `distances[i]` is the cumulative distance from the start of the path to
//! the **end** of segment `i`.  A train's `progress` is measured on the same
//! axis, so the segment under a point is the first `i` with
//! `progress < distances[i]`:
//!
//! ```text
//!  seg 0        seg 1             seg 2
//! |------------|-----------------|--------|
//! 0         d[0]              d[1]     d[2] = total_length
//! ```
//!
//! Paths are immutable once built; a train owns its path for the lifetime of
//! the simulation.

use rt_core::{SegmentId, SidingId};

use crate::{RailBase, Segment, TrackError, TrackResult};

// ── Footprint ─────────────────────────────────────────────────────────────────

/// Inclusive range of path indices covered by a train body.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Footprint {
    pub tail: usize,
    pub head: usize,
}

impl Footprint {
    pub fn indices(self) -> std::ops::RangeInclusive<usize> {
        self.tail..=self.head
    }
}

// ── Path ──────────────────────────────────────────────────────────────────────

/// Ordered rail segments plus their cumulative end distances.
///
/// Do not construct directly; use [`PathBuilder`].
#[derive(Clone, Debug, Default)]
pub struct Path {
    segments:  Vec<Segment>,
    distances: Vec<f64>,
}

impl Path {
    /// A path with no segments.  Trains on an empty path can never deploy.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn last_index(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    /// Cumulative distance at the end of segment `index`.
    ///
    /// Indices past the end clamp to the total length.
    #[inline]
    pub fn end_distance(&self, index: usize) -> f64 {
        match self.distances.get(index) {
            Some(&d) => d,
            None => self.total_length(),
        }
    }

    /// Cumulative distance at the start of segment `index`.
    #[inline]
    pub fn start_distance(&self, index: usize) -> f64 {
        if index == 0 { 0.0 } else { self.end_distance(index - 1) }
    }

    pub fn total_length(&self) -> f64 {
        self.distances.last().copied().unwrap_or(0.0)
    }

    /// Speed limit of segment `index`, or `0.0` past the end of the path.
    #[inline]
    pub fn speed_limit(&self, index: usize) -> f64 {
        self.segments.get(index).map_or(0.0, |s| s.speed_limit)
    }

    /// Index of the segment under `progress`.
    ///
    /// With `round_down`, a point exactly on a boundary belongs to the
    /// segment that ends there rather than the one that starts there.
    /// Points past the end map to the last segment.
    pub fn index_at(&self, progress: f64, round_down: bool) -> usize {
        self.distances
            .iter()
            .position(|&d| progress < d || (round_down && progress == d))
            .unwrap_or_else(|| self.last_index())
    }

    /// Segment indices under a train whose head is at `head_progress` and
    /// whose body extends `body_length` behind it.
    pub fn footprint(&self, head_progress: f64, body_length: f64) -> Footprint {
        Footprint {
            head: self.index_at(head_progress, true),
            tail: self.index_at(head_progress - body_length, false),
        }
    }

    /// Segment ids a footprint reserves for block signalling.
    ///
    /// The first path segment and any segment of `own_siding` are skipped so a
    /// parked train never blocks the depot it is leaving.
    pub fn reserved_segments(
        &self,
        footprint: Footprint,
        own_siding: SidingId,
    ) -> impl Iterator<Item = SegmentId> + '_ {
        footprint
            .indices()
            .filter(|&i| i > 0)
            .filter_map(move |i| self.segments.get(i))
            .filter(move |s| s.base != RailBase::Siding(own_siding))
            .map(|s| s.id)
    }

    /// First index at or after `from` whose segment has a dwell time, or the
    /// last index if none does.
    pub fn next_stop_from(&self, from: usize) -> usize {
        self.segments
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, s)| s.is_stop())
            .map_or_else(|| self.last_index(), |(i, _)| i)
    }
}

// ── PathBuilder ───────────────────────────────────────────────────────────────

/// Construct a [`Path`] segment by segment, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use rt_core::{PlatformId, SidingId};
/// use rt_track::{PathBuilder, Segment};
///
/// let mut b = PathBuilder::new();
/// b.push(Segment::new(1, 80.0, 0.5).in_siding(SidingId(9)));
/// b.push(Segment::new(2, 400.0, 1.0));
/// b.push(Segment::new(3, 120.0, 0.8).at_platform(PlatformId(5), 1, 40));
/// let path = b.build().unwrap();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.total_length(), 600.0);
/// ```
#[derive(Default)]
pub struct PathBuilder {
    segments: Vec<Segment>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self { segments: Vec::new() }
    }

    pub fn with_capacity(segments: usize) -> Self {
        Self { segments: Vec::with_capacity(segments) }
    }

    pub fn push(&mut self, segment: Segment) -> &mut Self {
        self.segments.push(segment);
        self
    }

    pub fn extend<I: IntoIterator<Item = Segment>>(&mut self, segments: I) -> &mut Self {
        self.segments.extend(segments);
        self
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Validate every segment and accumulate end distances.
    ///
    /// Lengths and speed limits must be strictly positive: the kinematics
    /// solver divides by both.
    pub fn build(self) -> TrackResult<Path> {
        if self.segments.is_empty() {
            return Err(TrackError::EmptyPath);
        }

        let mut distances = Vec::with_capacity(self.segments.len());
        let mut total = 0.0;
        for (index, s) in self.segments.iter().enumerate() {
            if !(s.length.is_finite() && s.length > 0.0) {
                return Err(TrackError::BadLength { index, id: s.id, length: s.length });
            }
            if !(s.speed_limit.is_finite() && s.speed_limit > 0.0) {
                return Err(TrackError::BadSpeedLimit { index, id: s.id, limit: s.speed_limit });
            }
            total += s.length;
            distances.push(total);
        }

        Ok(Path { segments: self.segments, distances })
    }
}
