use rt_core::{RtError, TrainId};
use rt_motion::MotionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("world configuration error: {0}")]
    Config(#[from] RtError),

    #[error("train at index {index} has id {id}; ids must match their position")]
    TrainIdMismatch { index: usize, id: TrainId },

    #[error("train {train} was built with acceleration {got}, world uses {expected}")]
    AccelerationMismatch { train: TrainId, expected: f64, got: f64 },

    #[error("motion error: {0}")]
    Motion(#[from] MotionError),
}

pub type SimResult<T> = Result<T, SimError>;
