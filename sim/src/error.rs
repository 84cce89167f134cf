//! Error types for fallible construction paths.
//!
//! Stepping the simulation never fails; only configuration and level data
//! handed in from outside can be rejected.

use thiserror::Error;

/// Invalid simulation configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("`{field}` must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Invalid level data (obstacle list or tile grid).
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to parse level data")]
    Parse(#[from] serde_json::Error),
    #[error("obstacle {index} has non-positive extent {width}x{height}")]
    DegenerateObstacle { index: usize, width: f32, height: f32 },
    #[error("unknown tile code {code} at row {row}, column {col}")]
    UnknownTile { row: usize, col: usize, code: u8 },
    #[error("tile row {row} has {len} columns, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },
}

/// Umbrella error for building a simulation world.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Level(#[from] LevelError),
}
