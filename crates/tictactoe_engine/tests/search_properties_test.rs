//! Properties of the minimax search over whole games.

use tictactoe_engine::{
    Board, Cell, DRAW_SCORE, Mark, MarkAssignment, Role, SearchResult, Square, minimax,
};

/// Plays every legal player sequence against the search, calling `check`
/// on each finished board.
fn explore_player_choices(board: &mut Board, marks: MarkAssignment, check: &mut dyn FnMut(&Board)) {
    let empty: Vec<Cell> = board.empty_cells().collect();
    for cell in empty {
        board.set_cell(cell, Square::Occupied(marks.player()));

        if board.winner().is_some() || board.is_full() {
            check(&*board);
        } else {
            let reply = minimax(board, Role::Minimizer, marks);
            let ai_cell = reply.best.expect("non-terminal board has a move");
            assert!(board.is_empty(ai_cell), "search chose occupied {ai_cell}");
            board.set_cell(ai_cell, Square::Occupied(marks.ai()));

            if board.winner().is_some() || board.is_full() {
                check(&*board);
            } else {
                explore_player_choices(board, marks, check);
            }

            board.set_cell(ai_cell, Square::Empty);
        }

        board.set_cell(cell, Square::Empty);
    }
}

#[test]
fn test_ai_never_loses_when_player_opens() {
    let marks = MarkAssignment::default();
    let mut board = Board::new();
    let mut games = 0;

    explore_player_choices(&mut board, marks, &mut |finished| {
        games += 1;
        assert!(
            !finished.has_line(marks.player()),
            "player won:\n{finished}"
        );
    });

    assert!(games > 0);
    assert_eq!(board, Board::new());
}

#[test]
fn test_ai_never_loses_when_ai_opens() {
    let marks = MarkAssignment::new(Mark::O);
    let mut board = Board::new();

    let opening = minimax(&board, Role::Minimizer, marks);
    let cell = opening.best.expect("empty board has a move");
    board.set_cell(cell, Square::Occupied(marks.ai()));

    explore_player_choices(&mut board, marks, &mut |finished| {
        assert!(
            !finished.has_line(marks.player()),
            "player won:\n{finished}"
        );
    });
}

#[test]
fn test_empty_board_is_a_draw_for_ai_opening() {
    let board = Board::new();
    let result = minimax(&board, Role::Minimizer, MarkAssignment::default());

    assert_eq!(result.score, DRAW_SCORE);
    let cell = result.best.expect("empty board has a move");
    assert!(cell.is_corner() || cell == Cell::Center);
    // First drawing cell in row-major order.
    assert_eq!(cell, Cell::TopLeft);
    assert_eq!(board, Board::new());
}

#[test]
fn test_search_is_deterministic() {
    let board: Board = "X__/_O_/__X".parse().unwrap();
    let marks = MarkAssignment::default();

    let first = minimax(&board, Role::Minimizer, marks);
    for _ in 0..5 {
        assert_eq!(minimax(&board, Role::Minimizer, marks), first);
    }
    // O must take an edge against the opposite-corners setup.
    assert_eq!(
        first,
        SearchResult {
            score: DRAW_SCORE,
            best: Some(Cell::TopCenter)
        }
    );
}

#[test]
fn test_search_leaves_board_untouched() {
    let boards = ["___/___/___", "X__/_O_/___", "XO_/_X_/__O", "XOX/OX_/___"];
    for text in boards {
        let board: Board = text.parse().unwrap();
        let snapshot = *board.squares();
        for role in [Role::Maximizer, Role::Minimizer] {
            let _ = minimax(&board, role, MarkAssignment::default());
            assert_eq!(*board.squares(), snapshot, "board {text} changed");
        }
    }
}
