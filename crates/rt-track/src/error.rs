//! Track error type.

use thiserror::Error;

use rt_core::SegmentId;

/// Errors produced while assembling a [`Path`][crate::Path].
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("path has no segments")]
    EmptyPath,

    #[error("segment {id} at index {index} has non-positive length {length}")]
    BadLength { index: usize, id: SegmentId, length: f64 },

    #[error("segment {id} at index {index} has non-positive speed limit {limit}")]
    BadSpeedLimit { index: usize, id: SegmentId, limit: f64 },
}

pub type TrackResult<T> = Result<T, TrackError>;
