//! Board representation for tic-tac-toe
//!
//! The board is a fixed row-major sequence of 9 cells, indexed 0..8 from the
//! top-left corner. Each cell is empty or holds one side's mark.

use std::fmt;

use serde::{Serialize, Serializer};

/// Number of cells on the board
pub const BOARD_SIZE: usize = 9;

/// One of the two players' marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Side A, always the player that enters matchmaking
    X,
    /// Side B
    O,
}

impl Side {
    /// Returns the opposing side
    pub fn opponent(self) -> Self {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }

    /// Wire token for this side: `"x"` or `"o"`
    pub fn token(self) -> &'static str {
        match self {
            Side::X => "x",
            Side::O => "o",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Side),
}

impl Cell {
    /// Wire token for this cell: `""`, `"x"` or `"o"`
    pub fn token(self) -> &'static str {
        match self {
            Cell::Empty => "",
            Cell::Taken(side) => side.token(),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

/// Error type for board and rules operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("Invalid position {position}, expected 0..8")]
    InvalidPosition { position: usize },
    #[error("Position {position} is already occupied")]
    CellOccupied { position: usize },
}

/// 3x3 tic-tac-toe board
///
/// Cells only ever go from `Empty` to `Taken`: `place` refuses to overwrite an
/// occupied cell, so the set of taken cells is exactly the set of completed moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Get the cell at `position`
    pub fn get(&self, position: usize) -> Result<Cell, RulesError> {
        self.cells
            .get(position)
            .copied()
            .ok_or(RulesError::InvalidPosition { position })
    }

    /// Mark `position` for `side`
    ///
    /// # Errors
    ///
    /// Returns `InvalidPosition` when `position` is outside 0..8 and
    /// `CellOccupied` when the cell already holds a mark.
    pub fn place(&mut self, position: usize, side: Side) -> Result<(), RulesError> {
        if !self.get(position)?.is_empty() {
            return Err(RulesError::CellOccupied { position });
        }
        self.cells[position] = Cell::Taken(side);
        Ok(())
    }

    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    /// Board as the ordered sequence of 9 wire tokens
    pub fn tokens(&self) -> [&'static str; BOARD_SIZE] {
        self.cells.map(Cell::token)
    }

    /// Lowest-indexed empty cell, if any
    pub fn first_empty(&self) -> Option<usize> {
        self.cells.iter().position(|cell| cell.is_empty())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.cells[pos] {
                    Cell::Empty => write!(f, "{}", pos + 1)?,
                    Cell::Taken(side) => write!(f, "{}", side.token().to_uppercase())?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}
