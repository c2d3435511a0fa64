//! Error types for simulation construction and state checking

use thiserror::Error;

/// Invalid construction parameters. Fatal to the instance being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Dense grids need at least 3 cells per axis so no cell wraps onto itself
    #[error("grid must be at least {min}x{min} cells, got {width}x{height}")]
    GridTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },

    #[error("screen dimensions must be positive, got {width}x{height}")]
    NonPositiveScreen { width: i32, height: i32 },

    #[error("cell size must be positive, got {0}")]
    NonPositiveCellSize(i32),

    #[error("cell size {cell_size} does not evenly divide a {width}x{height} screen")]
    UnevenCellSize {
        width: i32,
        height: i32,
        cell_size: i32,
    },

    #[error("cell group limits must be positive, got {max_groups} groups of up to {max_group_size} cells")]
    InvalidGroupLimits {
        max_groups: usize,
        max_group_size: usize,
    },
}

/// Errors surfaced by the simulation core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Engine state broke one of its structural guarantees
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

pub type SimulationResult<T> = std::result::Result<T, SimulationError>;
