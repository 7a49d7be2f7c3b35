//! Error types for the checkers engine and its collaborators

use thiserror::Error;

/// Main error type for the crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("cell ({row}, {col}) is outside of the board")]
    OutOfBounds { row: i32, col: i32 },

    #[error(transparent)]
    IllegalMove(#[from] IllegalMove),

    #[error("invalid move notation '{0}' (expected something like 'A6-B5')")]
    InvalidNotation(String),

    #[error("invalid board diagram: {0}")]
    InvalidDiagram(String),
}

/// Reasons a proposed move is rejected. The display strings are what the
/// player sees.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalMove {
    #[error("Source cell is outside of the board.")]
    SourceOutOfBounds,

    #[error("Target cell is outside of the board.")]
    TargetOutOfBounds,

    #[error("Source cell is empty.")]
    SourceEmpty,

    #[error("Target cell is not empty.")]
    TargetOccupied,

    #[error("Source cell holds opponent's piece/tower.")]
    OpponentPiece,

    #[error("Illegal action.")]
    IllegalAction,
}

pub type Result<T> = std::result::Result<T, Error>;
