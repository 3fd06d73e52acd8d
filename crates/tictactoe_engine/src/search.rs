//! Exhaustive minimax search.
//!
//! The maximizing role always plays the human player's mark and the
//! minimizing role the AI's mark. Terminal positions score `+10` for a
//! player line, `-10` for an AI line and `0` for a full board. Scores are not
//! adjusted for depth, and ties go to the first cell found in row-major
//! order.

use super::{Board, Cell, MarkAssignment, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Score of a position where the player (maximizer) has a line.
pub const WIN_SCORE: i32 = 10;

/// Score of a position where the AI (minimizer) has a line.
pub const LOSS_SCORE: i32 = -WIN_SCORE;

/// Score of a full board without a line.
pub const DRAW_SCORE: i32 = 0;

/// Side of the adversarial search that is to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Plays the player's mark and prefers higher scores.
    Maximizer,
    /// Plays the AI's mark and prefers lower scores.
    Minimizer,
}

impl Role {
    /// The role moving next.
    pub fn flip(self) -> Self {
        match self {
            Role::Maximizer => Role::Minimizer,
            Role::Minimizer => Role::Maximizer,
        }
    }
}

/// Best score and cell for the role to move.
///
/// `best` is `None` when the position is terminal; such a result must not be
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchResult {
    /// Minimax value of the position.
    pub score: i32,
    /// Chosen cell, if any legal cell exists.
    pub best: Option<Cell>,
}

impl SearchResult {
    fn terminal(score: i32) -> Self {
        Self { score, best: None }
    }

    /// Row of the chosen cell.
    pub fn row(&self) -> Option<usize> {
        self.best.map(Cell::row)
    }

    /// Column of the chosen cell.
    pub fn col(&self) -> Option<usize> {
        self.best.map(Cell::col)
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Positions visited, root included.
    pub nodes: u64,
    /// Terminal positions scored.
    pub leaves: u64,
}

/// Runs minimax from `board` with `role` to move.
///
/// `board` is not modified: the search explores a private copy, placing and
/// removing marks symmetrically.
#[instrument(skip(board), fields(board = %board))]
pub fn minimax(board: &Board, role: Role, marks: MarkAssignment) -> SearchResult {
    minimax_with_stats(board, role, marks).0
}

/// Like [`minimax`] but also returns node counts.
pub fn minimax_with_stats(
    board: &Board,
    role: Role,
    marks: MarkAssignment,
) -> (SearchResult, SearchStats) {
    let mut work = *board;
    let mut stats = SearchStats::default();
    let result = search(&mut work, role, marks, &mut stats);
    debug_assert_eq!(&work, board, "search left residual marks");
    (result, stats)
}

fn terminal_score(board: &Board, marks: MarkAssignment) -> Option<i32> {
    if board.has_line(marks.player()) {
        Some(WIN_SCORE)
    } else if board.has_line(marks.ai()) {
        Some(LOSS_SCORE)
    } else if board.is_full() {
        Some(DRAW_SCORE)
    } else {
        None
    }
}

fn search(
    board: &mut Board,
    role: Role,
    marks: MarkAssignment,
    stats: &mut SearchStats,
) -> SearchResult {
    stats.nodes += 1;

    if let Some(score) = terminal_score(board, marks) {
        stats.leaves += 1;
        return SearchResult::terminal(score);
    }

    let mark = match role {
        Role::Maximizer => marks.player(),
        Role::Minimizer => marks.ai(),
    };

    let mut best = SearchResult {
        score: match role {
            Role::Maximizer => i32::MIN,
            Role::Minimizer => i32::MAX,
        },
        best: None,
    };

    for cell in Cell::ALL {
        if !board.is_empty(cell) {
            continue;
        }

        board.set_cell(cell, Square::Occupied(mark));
        let score = search(board, role.flip(), marks, stats).score;
        board.set_cell(cell, Square::Empty);

        let improves = match role {
            Role::Maximizer => score > best.score,
            Role::Minimizer => score < best.score,
        };
        if improves {
            best = SearchResult {
                score,
                best: Some(cell),
            };
        }
    }

    best
}

/// Strategy that picks a move for a role.
///
/// The engine is generic over this so the selection can be swapped, e.g. for
/// a scripted opponent in tests.
pub trait MoveSearch {
    /// Searches `board` for the best move of `role`.
    fn search(&self, board: &Board, role: Role, marks: MarkAssignment) -> SearchResult;
}

/// Full-depth minimax, the default [`MoveSearch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Minimax;

impl MoveSearch for Minimax {
    fn search(&self, board: &Board, role: Role, marks: MarkAssignment) -> SearchResult {
        let (result, stats) = minimax_with_stats(board, role, marks);
        tracing::debug!(
            score = result.score,
            best = ?result.best,
            nodes = stats.nodes,
            leaves = stats.leaves,
            "Minimax search complete"
        );
        result
    }
}
