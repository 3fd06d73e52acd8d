//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. The board delegates its derived queries
//! here so rules stay separate from storage.

use super::{Board, Cell, Mark, Square};

/// The eight winning lines: three rows, three columns, two diagonals.
pub const LINES: [[Cell; 3]; 8] = [
    // Rows
    [Cell::TopLeft, Cell::TopCenter, Cell::TopRight],
    [Cell::MiddleLeft, Cell::Center, Cell::MiddleRight],
    [Cell::BottomLeft, Cell::BottomCenter, Cell::BottomRight],
    // Columns
    [Cell::TopLeft, Cell::MiddleLeft, Cell::BottomLeft],
    [Cell::TopCenter, Cell::Center, Cell::BottomCenter],
    [Cell::TopRight, Cell::MiddleRight, Cell::BottomRight],
    // Diagonals
    [Cell::TopLeft, Cell::Center, Cell::BottomRight],
    [Cell::TopRight, Cell::Center, Cell::BottomLeft],
];

/// True iff some line is made entirely of `mark`.
pub fn has_line(board: &Board, mark: Mark) -> bool {
    let wanted = Square::Occupied(mark);
    LINES
        .iter()
        .any(|line| line.iter().all(|&cell| board.get_cell(cell) == wanted))
}

/// Returns the mark owning a completed line, if any.
///
/// X is checked before O; reachable positions never hold both.
pub fn winner(board: &Board) -> Option<Mark> {
    [Mark::X, Mark::O]
        .into_iter()
        .find(|&mark| has_line(board, mark))
}

/// True iff no square is empty.
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// A completed line or a full board.
pub fn is_terminal(board: &Board) -> bool {
    winner(board).is_some() || is_full(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().expect("valid board")
    }

    #[test]
    fn test_no_line_on_empty_board() {
        let board = Board::new();
        assert!(!has_line(&board, Mark::X));
        assert!(!has_line(&board, Mark::O));
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_every_line_is_detected() {
        for line in LINES {
            let mut board = Board::new();
            for cell in line {
                board.set_cell(cell, Square::Occupied(Mark::O));
            }
            assert!(has_line(&board, Mark::O), "line {:?} not detected", line);
            assert!(!has_line(&board, Mark::X));
            assert_eq!(winner(&board), Some(Mark::O));
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = board("XXO/___/___");
        assert!(!has_line(&board, Mark::X));
        assert!(!has_line(&board, Mark::O));
    }

    #[test]
    fn test_has_line_matches_brute_force_on_all_boards() {
        // Every assignment of the three square values to nine cells.
        for code in 0..3usize.pow(9) {
            let mut board = Board::new();
            let mut rest = code;
            for cell in Cell::ALL {
                let square = match rest % 3 {
                    0 => Square::Empty,
                    1 => Square::Occupied(Mark::X),
                    _ => Square::Occupied(Mark::O),
                };
                board.set_cell(cell, square);
                rest /= 3;
            }
            for mark in [Mark::X, Mark::O] {
                let expected = LINES.iter().any(|line| {
                    line.iter()
                        .all(|&c| board.squares()[c.index()] == Square::Occupied(mark))
                });
                assert_eq!(has_line(&board, mark), expected);
            }
        }
    }

    #[test]
    fn test_full_board_draw() {
        let board = board("XOX/XOO/OXX");
        assert!(is_full(&board));
        assert_eq!(winner(&board), None);
        assert!(is_terminal(&board));
    }

    #[test]
    fn test_partial_board_not_terminal() {
        let board = board("X__/_O_/___");
        assert!(!is_full(&board));
        assert!(!is_terminal(&board));
    }
}
