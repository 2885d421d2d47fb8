use rt_core::TrainId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("train {train} has no cars")]
    NoCars { train: TrainId },

    #[error("train {train} has non-positive car spacing {spacing}")]
    BadSpacing { train: TrainId, spacing: f64 },

    #[error("train {train} has negative siding length {length}")]
    BadSidingLength { train: TrainId, length: f64 },
}

pub type MotionResult<T> = Result<T, MotionError>;
