use hashbrown::HashMap;
use thiserror::Error;

use crate::snakes::Cell;

/// Which of the two redirect tables a source cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    Snake,
    Ladder,
}

/// A forced move triggered by landing on a source cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub kind: RedirectKind,
    pub to: Cell,
}

/// Rejected board configurations. All of these abort setup, the game
/// never starts on a bad table.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell {0} is outside the board (1..=100)")]
    CellOutOfRange(Cell),
    #[error("cell {0} is a source in both the snake and the ladder table")]
    OverlappingSource(Cell),
    #[error("the final cell cannot be a redirect source")]
    SourceOnFinalCell,
    #[error("snake at {from} does not lead downward (goes to {to})")]
    SnakeGoesUp { from: Cell, to: Cell },
    #[error("ladder at {from} does not lead upward (goes to {to})")]
    LadderGoesDown { from: Cell, to: Cell },
}

/// The board topology: a fixed 10x10 serpentine grid plus the two
/// redirect tables merged into one lookup map. Stateless once built,
/// the [`crate::snakes::TurnEngine`] queries it every turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    redirects: HashMap<Cell, Redirect>,
}

impl Board {
    /// Cells per row and rows per board.
    pub const SIZE: Cell = 10;

    /// Total cell count. The last cell is the winning cell.
    pub const CELLS: Cell = Self::SIZE * Self::SIZE;

    /// Builds a board from the two source -> destination tables.
    /// Fails if a cell appears in both tables, if any cell is off the
    /// board, if the final cell is a source, or if a redirect points
    /// the wrong way for its kind.
    pub fn new(
        snakes: &[(Cell, Cell)],
        ladders: &[(Cell, Cell)],
    ) -> Result<Self, ConfigError> {
        let mut redirects = HashMap::with_capacity(snakes.len() + ladders.len());

        for &(from, to) in snakes {
            Self::check_cell(from)?;
            Self::check_cell(to)?;
            if to >= from {
                return Err(ConfigError::SnakeGoesUp { from, to });
            }
            redirects.insert(from, Redirect { kind: RedirectKind::Snake, to });
        }

        for &(from, to) in ladders {
            Self::check_cell(from)?;
            Self::check_cell(to)?;
            if to <= from {
                return Err(ConfigError::LadderGoesDown { from, to });
            }
            if redirects.contains_key(&from) {
                return Err(ConfigError::OverlappingSource(from));
            }
            redirects.insert(from, Redirect { kind: RedirectKind::Ladder, to });
        }

        if redirects.contains_key(&Self::CELLS) {
            return Err(ConfigError::SourceOnFinalCell);
        }

        Ok(Board { redirects })
    }

    /// The fixed production tables: 10 snakes, 9 ladders.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(
            &[
                (16, 6),
                (47, 26),
                (49, 11),
                (56, 53),
                (62, 19),
                (64, 60),
                (87, 24),
                (93, 73),
                (95, 75),
                (98, 78),
            ],
            &[
                (1, 38),
                (4, 14),
                (9, 31),
                (21, 42),
                (28, 84),
                (36, 44),
                (51, 67),
                (71, 91),
                (80, 100),
            ],
        )
    }

    /// Returns the snake or ladder triggered by landing on `cell`, if
    /// any. One-level: a destination is never looked up again.
    pub fn redirect_for(&self, cell: Cell) -> Option<Redirect> {
        self.redirects.get(&cell).copied()
    }

    /// All configured redirects, for highlighting sources and
    /// destinations on the drawn board.
    pub fn redirects(&self) -> impl Iterator<Item = (Cell, Redirect)> + '_ {
        self.redirects.iter().map(|(&from, &redirect)| (from, redirect))
    }

    fn check_cell(cell: Cell) -> Result<(), ConfigError> {
        if (1..=Self::CELLS).contains(&cell) {
            Ok(())
        } else {
            Err(ConfigError::CellOutOfRange(cell))
        }
    }
}

/// Maps a cell number to its (row, column) on the drawn grid. Row 0 is
/// the bottom row, numbered left to right; every odd row runs right to
/// left, so consecutive cells are always edge-adjacent.
pub fn grid_position(cell: Cell) -> (u8, u8) {
    debug_assert!((1..=Board::CELLS).contains(&cell));
    let row = (cell - 1) / Board::SIZE;
    let offset = (cell - 1) % Board::SIZE;
    let col = if row % 2 == 0 {
        offset
    } else {
        Board::SIZE - 1 - offset
    };
    (row, col)
}
