// error.rs - Error types for the simulation core

use thiserror::Error;

/// Everything that can go wrong when building or driving a simulation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifeError {
    #[error("invalid grid dimensions {width}x{height}: {reason}")]
    InvalidGridDimensions {
        width: usize,
        height: usize,
        reason: &'static str,
    },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("pattern holds {actual} cells but the grid holds {expected}")]
    PatternSizeMismatch { expected: usize, actual: usize },

    #[error("cell editing is not enabled for this simulation")]
    CellEditingDisabled,

    #[error("simulation has been disposed")]
    Disposed,

    #[error("no tokio runtime available to drive the tick controller")]
    NoRuntime,

    #[error("configuration error: {0}")]
    Config(String),
}

pub type LifeResult<T> = Result<T, LifeError>;

impl LifeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
