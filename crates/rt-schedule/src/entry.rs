//! Predicted platform visits and the per-platform store they are collected in.

use std::collections::{BTreeMap, BTreeSet};

use rt_core::{PlatformId, TrainId};

/// One predicted visit of a train to a platform.
///
/// Entries are regenerated from scratch every tick and never mutated.  The
/// derived ordering compares `arrival_millis` first, so a `BTreeSet` of
/// entries iterates in arrival order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleEntry {
    /// Unix milliseconds at which the train is expected to stop.
    pub arrival_millis:   i64,
    /// Unix milliseconds at which the train is expected to leave.
    pub departure_millis: i64,
    pub train:            TrainId,
    /// Vehicle type name.
    pub train_type:       String,
    /// Number of cars.
    pub train_length:     u32,
    pub platform:         PlatformId,
    pub destination:      String,
    /// No further station follows on this route.
    pub is_terminal:      bool,
}

impl ScheduleEntry {
    /// Milliseconds the train is expected to stand at the platform.
    #[inline]
    pub fn dwell_millis(&self) -> i64 {
        self.departure_millis - self.arrival_millis
    }
}

// ── ScheduleStore ─────────────────────────────────────────────────────────────

/// Every train's predictions for the current tick, grouped by platform.
///
/// The world clears the store at the start of each tick and refills it as
/// trains advance.
#[derive(Clone, Debug, Default)]
pub struct ScheduleStore {
    by_platform: BTreeMap<PlatformId, BTreeSet<ScheduleEntry>>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.by_platform.clear();
    }

    pub fn insert(&mut self, entry: ScheduleEntry) {
        self.by_platform.entry(entry.platform).or_default().insert(entry);
    }

    pub fn extend<I: IntoIterator<Item = ScheduleEntry>>(&mut self, entries: I) {
        for entry in entries {
            self.insert(entry);
        }
    }

    /// Entries for `platform`, earliest arrival first.
    pub fn for_platform(&self, platform: PlatformId) -> impl Iterator<Item = &ScheduleEntry> {
        self.by_platform.get(&platform).into_iter().flatten()
    }

    pub fn platforms(&self) -> impl Iterator<Item = PlatformId> + '_ {
        self.by_platform.keys().copied()
    }

    /// All entries, by platform then arrival.
    pub fn iter(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.by_platform.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.by_platform.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_platform.is_empty()
    }
}
