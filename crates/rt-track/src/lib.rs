//! `rt-track`: the fixed path a train runs along, and who occupies it.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`segment`]   | `Segment`, `RailBase`                                       |
//! | [`path`]      | `Path` (segments + cumulative distances), `PathBuilder`, `Footprint` |
//! | [`occupancy`] | `BlockOccupancy`, `is_blocked`                              |
//! | [`error`]     | `TrackError`, `TrackResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | Uses `rustc-hash` for the occupancy map.                   |
//! | `serde`   | Derives `Serialize`/`Deserialize` on segment types.        |

pub mod error;
pub mod occupancy;
pub mod path;
pub mod segment;

#[cfg(test)]
mod tests;

pub use error::{TrackError, TrackResult};
pub use occupancy::{BlockOccupancy, is_blocked};
pub use path::{Footprint, Path, PathBuilder};
pub use segment::{RailBase, Segment};
