//! Train state and per-tick outcome.

use std::fmt;

use rt_dispatch::RiderChange;

/// Where a train is in its run.
///
/// ```text
/// Idle ─deploy─▶ Accelerating/Running ─▶ Stopping ─▶ Stopped ─dwell done─▶ Accelerating …
///   ▲                                                   │ turn-back
///   │                                                   ▼
///   └────────────── end of path ◀──────────────────  Reversing
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum TrainState {
    /// Parked in the siding, waiting for a deploy grant.
    #[default]
    Idle,
    /// Below the segment limit and gaining speed.
    Accelerating,
    /// At (or settling onto) the segment limit.
    Running,
    /// Braking toward a stop or a blocked boundary.
    Stopping,
    /// Zero speed; counting dwell or waiting for the block ahead to clear.
    Stopped,
    /// The tick a train restarts in the opposite orientation.
    Reversing,
}

impl TrainState {
    #[inline]
    pub fn is_on_route(self) -> bool {
        self != TrainState::Idle
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrainState::Idle         => "idle",
            TrainState::Accelerating => "accelerating",
            TrainState::Running      => "running",
            TrainState::Stopping     => "stopping",
            TrainState::Stopped      => "stopped",
            TrainState::Reversing    => "reversing",
        }
    }
}

impl fmt::Display for TrainState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to a train during one `advance` call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AdvanceOutcome {
    /// The next stopping index changed, or riders boarded or alighted.
    /// Dependent systems use this to throttle their own updates.
    pub state_changed: bool,
    pub riders:        RiderChange,
    pub state:         TrainState,
}
