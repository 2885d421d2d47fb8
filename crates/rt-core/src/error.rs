//! Framework error type.
//!
//! Sub-crates define their own error enums and convert `RtError` into them
//! via `From` impls where they need to surface a configuration problem.

use thiserror::Error;

/// The top-level error type for `rt-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum RtError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `rt-*` crates.
pub type RtResult<T> = Result<T, RtError>;
