mod grid_world;

use thiserror::Error;

pub use grid_world::{Direction, GridWorld, Position};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} maze")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    #[error("maze map is empty")]
    EmptyMap,
    #[error("maze row {row} has {got} cells, expected {expected}")]
    RaggedMap {
        row: usize,
        got: usize,
        expected: usize,
    },
    #[error("invalid map character '{character}' at ({x}, {y})")]
    InvalidCell { character: char, x: i32, y: i32 },
    #[error("maze map declares no start ('S') cell")]
    MissingStart,
    #[error("maze map declares no goal ('G') cell")]
    MissingGoal,
    #[error("maze map declares more than one start ('S') cell")]
    DuplicateStart,
    #[error("maze map declares more than one goal ('G') cell")]
    DuplicateGoal,
    #[error("maze border is open at ({x}, {y}), it must be walled")]
    OpenBorder { x: i32, y: i32 },
}
