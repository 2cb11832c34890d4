//! Error types for the chart data adapter.

use thiserror::Error;

use crate::state::Direction;

/// Errors raised by the sample buffers, their sinks and configuration.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("series capacity must be greater than zero")]
    InvalidCapacity,

    #[error("series capacity {requested} exceeds the limit of {max} samples")]
    CapacityTooLarge { requested: usize, max: usize },

    #[error("{direction} sink is detached; its series was dropped")]
    SinkDetached { direction: Direction },

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
