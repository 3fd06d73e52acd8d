//! One-shot position analysis for the `analyze` command.

use serde::Serialize;
use std::fmt;
use tictactoe_engine::invariants::{BoardInvariants, InvariantSet, describe};
use tictactoe_engine::{
    Board, Cell, DRAW_SCORE, EngineError, MarkAssignment, Role, Side, WIN_SCORE,
    minimax_with_stats,
};
use tracing::{debug, instrument};

/// Search report for a single position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Compact rendering such as `"X__/_O_/___"`.
    pub board: String,
    /// Side the search moved for.
    pub to_move: Side,
    /// Minimax value; positive favours the player.
    pub score: i32,
    /// Best cell, absent for finished positions.
    pub best: Option<Cell>,
    /// Row of `best`.
    pub row: Option<usize>,
    /// Column of `best`.
    pub col: Option<usize>,
    /// Positions visited.
    pub nodes: u64,
    /// Terminal positions scored.
    pub leaves: u64,
}

impl Analysis {
    /// Result with perfect play from both sides.
    pub fn verdict(&self) -> &'static str {
        match self.score {
            s if s >= WIN_SCORE => "player wins",
            s if s == DRAW_SCORE => "draw",
            _ => "AI wins",
        }
    }
}

/// Searches `board` for `to_move`.
///
/// # Errors
///
/// `InvalidPosition` when the board could not arise in a real game.
#[instrument(skip(board), fields(board = %compact(board)))]
pub fn analyze(board: &Board, to_move: Side, marks: MarkAssignment) -> Result<Analysis, EngineError> {
    BoardInvariants::check_all(board)
        .map_err(|violations| EngineError::InvalidPosition(describe(&violations)))?;

    let role = match to_move {
        Side::Player => Role::Maximizer,
        Side::Ai => Role::Minimizer,
    };
    let (result, stats) = minimax_with_stats(board, role, marks);
    debug!(score = result.score, nodes = stats.nodes, "Analysis complete");

    Ok(Analysis {
        board: compact(board),
        to_move,
        score: result.score,
        best: result.best,
        row: result.row(),
        col: result.col(),
        nodes: stats.nodes,
        leaves: stats.leaves,
    })
}

/// Renders a board as three `/`-separated rows with `_` for empty squares.
pub fn compact(board: &Board) -> String {
    board
        .to_string()
        .lines()
        .filter(|line| !line.starts_with('-'))
        .map(|line| {
            line.chars()
                .filter(|&c| c != '|')
                .map(|c| if c.is_ascii_digit() { '_' } else { c })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("/")
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Position: {}", self.board)?;
        writeln!(f, "To move:  {}", self.to_move)?;
        match self.best {
            Some(cell) => writeln!(f, "Best:     {}", cell)?,
            None => writeln!(f, "Best:     none (game is over)")?,
        }
        writeln!(f, "Score:    {} ({})", self.score, self.verdict())?;
        write!(f, "Searched: {} positions, {} leaves", self.nodes, self.leaves)
    }
}
