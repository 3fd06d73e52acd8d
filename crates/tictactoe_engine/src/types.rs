//! Core domain types for tic-tac-toe.

use super::cell::{BOARD_SIZE, Cell};
use super::rules;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A concrete mark a side places on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    /// Cross.
    X,
    /// Nought.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square holding a mark.
    Occupied(Mark),
}

/// Which mark belongs to the human player and which to the AI.
///
/// Fixed for the lifetime of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkAssignment {
    player: Mark,
}

impl MarkAssignment {
    /// Assigns `player` to the human and the other mark to the AI.
    pub fn new(player: Mark) -> Self {
        Self { player }
    }

    /// The human player's mark.
    pub fn player(&self) -> Mark {
        self.player
    }

    /// The AI's mark.
    pub fn ai(&self) -> Mark {
        self.player.opponent()
    }
}

impl Default for MarkAssignment {
    fn default() -> Self {
        Self::new(Mark::X)
    }
}

/// Which side a move or turn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    /// The human player.
    Player,
    /// The automated player.
    Ai,
}

impl Side {
    /// The other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics when either coordinate is outside `[0, 3)`.
    pub fn get(&self, row: usize, col: usize) -> Square {
        self.get_cell(checked_cell(row, col))
    }

    /// Sets the square at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics when either coordinate is outside `[0, 3)`.
    pub fn set(&mut self, row: usize, col: usize, square: Square) {
        self.set_cell(checked_cell(row, col), square);
    }

    /// Gets the square at a cell.
    pub fn get_cell(&self, cell: Cell) -> Square {
        self.squares[cell.index()]
    }

    /// Sets the square at a cell.
    pub fn set_cell(&mut self, cell: Cell, square: Square) {
        self.squares[cell.index()] = square;
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get_cell(cell) == Square::Empty
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// True iff no square is empty.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// True iff one of the eight lines is made entirely of `mark`.
    pub fn has_line(&self, mark: Mark) -> bool {
        rules::has_line(self, mark)
    }

    /// The mark owning a completed line, if any.
    pub fn winner(&self) -> Option<Mark> {
        rules::winner(self)
    }

    /// Empty cells in row-major order.
    ///
    /// The iterator borrows the board; call again to restart.
    pub fn empty_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        Cell::ALL.into_iter().filter(|&cell| self.is_empty(cell))
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|&&s| s == Square::Occupied(mark))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn checked_cell(row: usize, col: usize) -> Cell {
    match Cell::from_coords(row, col) {
        Some(cell) => cell,
        None => panic!("coordinates ({row}, {col}) are outside the {BOARD_SIZE}x{BOARD_SIZE} board"),
    }
}

/// Renders empty squares as their keypad number (1-9).
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let pos = row * BOARD_SIZE + col;
                match self.squares[pos] {
                    Square::Empty => write!(f, "{}", pos + 1)?,
                    Square::Occupied(mark) => write!(f, "{}", mark)?,
                }
                if col < BOARD_SIZE - 1 {
                    write!(f, "|")?;
                }
            }
            if row < BOARD_SIZE - 1 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

/// Error parsing a compact board description.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseBoardError {
    /// A character that is neither a mark, an empty marker nor a separator.
    #[display("Unexpected character {:?} in board", _0)]
    InvalidChar(char),

    /// The description did not contain exactly nine squares.
    #[display("Board needs exactly 9 squares, found {}", _0)]
    WrongLength(usize),
}

impl std::error::Error for ParseBoardError {}

/// Parses boards such as `"X__/X__/_OO"`.
///
/// `X`/`O` (any case) are marks; `_`, `.` and the digits 1-9 are empty
/// squares; whitespace, `/`, `|`, `-` and `+` are ignored, so the
/// [`Display`](std::fmt::Display) rendering parses back.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = Vec::with_capacity(9);
        for c in s.chars() {
            let square = match c {
                'x' | 'X' => Square::Occupied(Mark::X),
                'o' | 'O' => Square::Occupied(Mark::O),
                '_' | '.' | '1'..='9' => Square::Empty,
                '/' | '|' | '-' | '+' => continue,
                c if c.is_whitespace() => continue,
                c => return Err(ParseBoardError::InvalidChar(c)),
            };
            squares.push(square);
        }

        let squares: [Square; 9] = squares
            .try_into()
            .map_err(|v: Vec<Square>| ParseBoardError::WrongLength(v.len()))?;
        Ok(Self { squares })
    }
}

/// A mark placed on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// Where the mark was placed.
    pub cell: Cell,
    /// The mark placed.
    pub mark: Mark,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.cell)
    }
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The human player completed a line.
    PlayerWins,
    /// The AI completed a line.
    AiWins,
    /// Board filled with no line.
    Draw,
}

impl Outcome {
    /// The winning side, if any.
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::PlayerWins => Some(Side::Player),
            Outcome::AiWins => Some(Side::Ai),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::PlayerWins => write!(f, "Player wins"),
            Outcome::AiWins => write!(f, "AI wins"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
