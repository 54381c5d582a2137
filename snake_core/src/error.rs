use thiserror::Error;

use crate::Vector2;

/// Programmer errors raised while building core objects.
///
/// Expected gameplay conditions (illegal turns, collisions, unreadable
/// stored values) never produce one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("snake must have at least one segment")]
    EmptySnake,
    #[error("segment {index} at {at} is not orthogonally adjacent to {previous}")]
    DetachedSegment {
        index: usize,
        at: Vector2,
        previous: Vector2,
    },
    #[error("direction {0} is not a unit axis vector")]
    InvalidDirection(Vector2),
    #[error("effect duration must be finite and positive, got {0}")]
    InvalidDuration(f64),
    #[error("grid size must be positive, got {0}")]
    InvalidGridSize(i32),
    #[error("time step must be finite and positive, got {0}")]
    InvalidTimeStep(f64),
    #[error("hazard {0} lies outside the grid")]
    HazardOutOfBounds(Vector2),
    #[error("hazard {0} overlaps the spawned snake")]
    HazardOnSnake(Vector2),
    #[error("grid {grid}x{grid} has no free cell left for food")]
    NoFreeCell { grid: i32 },
    #[error("grid {grid}x{grid} cannot hold a snake of length {length}")]
    SnakeTooLong { grid: i32, length: usize },
}

pub type CoreResult<T> = Result<T, CoreError>;
