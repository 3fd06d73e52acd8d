//! Engine error types.

use super::Cell;
use serde::{Deserialize, Serialize};

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum IllegalMoveReason {
    /// The target cell already holds a mark.
    #[display("{} is already occupied", _0)]
    Occupied(Cell),

    /// The game has ended.
    #[display("the game is already over")]
    GameOver,

    /// No game has been started.
    #[display("no game has been started")]
    GameNotStarted,

    /// The other side is to move.
    #[display("it is not this side's turn")]
    NotYourTurn,

    /// The AI is enabled and makes its own moves.
    #[display("the AI side is controlled by the engine")]
    AiControlled,

    /// The AI is disabled, so the engine does not move for it.
    #[display("the AI is disabled for this game")]
    AiDisabled,
}

/// Error returned by [`crate::GameEngine`] operations.
///
/// A rejected operation never changes engine state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// The move breaks the rules in the current state.
    #[display("Illegal move: {}", _0)]
    IllegalMove(IllegalMoveReason),

    /// Coordinates outside the 3x3 board.
    #[display("Coordinates ({}, {}) are outside the board", row, col)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// Internal consistency broke, e.g. the search chose an occupied cell.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),

    /// A position handed to the engine cannot start a game.
    #[display("Invalid position: {}", _0)]
    InvalidPosition(String),
}

impl std::error::Error for EngineError {}

impl From<IllegalMoveReason> for EngineError {
    fn from(reason: IllegalMoveReason) -> Self {
        EngineError::IllegalMove(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = EngineError::from(IllegalMoveReason::Occupied(Cell::Center));
        assert_eq!(err.to_string(), "Illegal move: Center (1, 1) is already occupied");

        let err = EngineError::OutOfBounds { row: 3, col: 0 };
        assert!(err.to_string().contains("(3, 0)"));
    }
}
