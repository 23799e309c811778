//! Error taxonomy for the n-body engine
//!
//! Every variant is raised synchronously by the call that received the bad
//! input. Nothing is clamped or retried internally.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid container size {0}: body count must be non-negative")]
    InvalidSize(i64),

    #[error("body index {index} out of range for container of {len} bodies")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid mass {mass} for body {index}: mass must be strictly positive")]
    InvalidMass { index: usize, mass: f64 },

    #[error("length mismatch for {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid thread count {0}: at least one worker is required")]
    InvalidThreadCount(usize),

    #[error("invalid repeat count {0}: benchmark needs at least one step")]
    InvalidRepeatCount(usize),

    #[error("invalid time step {0}: dt must be finite and positive")]
    InvalidTimeStep(f64),

    #[error("failed to build worker thread team: {0}")]
    ThreadPool(String),

    #[error("a force worker panicked during the step")]
    WorkerPanicked,
}

impl From<rayon::ThreadPoolBuildError> for SimError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        SimError::ThreadPool(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Reject non-finite or non-positive step sizes
pub(crate) fn check_dt(dt: f64) -> Result<()> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidTimeStep(dt))
    }
}

/// Reject worker counts below one
pub(crate) fn check_threads(threads: usize) -> Result<()> {
    if threads == 0 {
        return Err(SimError::InvalidThreadCount(threads));
    }
    Ok(())
}
