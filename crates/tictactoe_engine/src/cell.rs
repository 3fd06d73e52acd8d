//! Board coordinates.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Side length of the board.
pub const BOARD_SIZE: usize = 3;

/// One of the nine cells of the board, in row-major order.
///
/// Converts to and from `(row, col)` pairs in `[0, 3) x [0, 3)` and to the
/// flat index 0-8 used by [`crate::Board`] storage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Cell {
    /// Row 0, column 0.
    TopLeft,
    /// Row 0, column 1.
    TopCenter,
    /// Row 0, column 2.
    TopRight,
    /// Row 1, column 0.
    MiddleLeft,
    /// Row 1, column 1.
    Center,
    /// Row 1, column 2.
    MiddleRight,
    /// Row 2, column 0.
    BottomLeft,
    /// Row 2, column 1.
    BottomCenter,
    /// Row 2, column 2.
    BottomRight,
}

impl Cell {
    /// All nine cells in row-major order.
    pub const ALL: [Cell; 9] = [
        Cell::TopLeft,
        Cell::TopCenter,
        Cell::TopRight,
        Cell::MiddleLeft,
        Cell::Center,
        Cell::MiddleRight,
        Cell::BottomLeft,
        Cell::BottomCenter,
        Cell::BottomRight,
    ];

    /// Creates a cell from coordinates, or `None` when either is out of range.
    pub fn from_coords(row: usize, col: usize) -> Option<Self> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return None;
        }
        Self::from_index(row * BOARD_SIZE + col)
    }

    /// Creates a cell from its row-major index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Row-major index (0-8).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Row of this cell.
    pub fn row(self) -> usize {
        self.index() / BOARD_SIZE
    }

    /// Column of this cell.
    pub fn col(self) -> usize {
        self.index() % BOARD_SIZE
    }

    /// `(row, col)` pair.
    pub fn coords(self) -> (usize, usize) {
        (self.row(), self.col())
    }

    /// True for the four corners.
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Cell::TopLeft | Cell::TopRight | Cell::BottomLeft | Cell::BottomRight
        )
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Cell::TopLeft => "Top-left",
            Cell::TopCenter => "Top-center",
            Cell::TopRight => "Top-right",
            Cell::MiddleLeft => "Middle-left",
            Cell::Center => "Center",
            Cell::MiddleRight => "Middle-right",
            Cell::BottomLeft => "Bottom-left",
            Cell::BottomCenter => "Bottom-center",
            Cell::BottomRight => "Bottom-right",
        }
    }

    /// Parses a keypad number (1-9) or a label.
    ///
    /// Labels match case-insensitively and ignore separators, so
    /// `"top left"`, `"top-left"` and `"TopLeft"` all resolve.
    #[instrument]
    pub fn from_label_or_number(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(num) = s.parse::<usize>() {
            return num.checked_sub(1).and_then(Self::from_index);
        }

        let wanted = normalize(s);
        if wanted.is_empty() {
            return None;
        }
        <Cell as strum::IntoEnumIterator>::iter().find(|cell| normalize(cell.label()) == wanted)
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.label(), self.row(), self.col())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords_round_trip_row_major() {
        for (index, cell) in Cell::ALL.iter().enumerate() {
            assert_eq!(cell.index(), index);
            assert_eq!(Cell::from_coords(cell.row(), cell.col()), Some(*cell));
        }
        assert_eq!(Cell::BottomLeft.coords(), (2, 0));
    }

    #[test]
    fn test_out_of_range_coords() {
        assert_eq!(Cell::from_coords(3, 0), None);
        assert_eq!(Cell::from_coords(0, 3), None);
        assert_eq!(Cell::from_index(9), None);
    }

    #[test]
    fn test_parse_number_and_label() {
        assert_eq!(Cell::from_label_or_number("1"), Some(Cell::TopLeft));
        assert_eq!(Cell::from_label_or_number("9"), Some(Cell::BottomRight));
        assert_eq!(Cell::from_label_or_number("0"), None);
        assert_eq!(Cell::from_label_or_number("center"), Some(Cell::Center));
        assert_eq!(Cell::from_label_or_number("Bottom left"), Some(Cell::BottomLeft));
        assert_eq!(Cell::from_label_or_number("middle"), None);
    }
}
