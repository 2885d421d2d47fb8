use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("directory parse error: {0}")]
    Parse(String),

    #[error("route {route} lists unknown platform {platform}")]
    UnknownPlatform { route: u64, platform: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
