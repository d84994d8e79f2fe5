//! The 4x4 board and move directions.
//!
//! ## Layout
//!
//! Cells are stored row-major as `[[Tile; 4]; 4]`. Row 0 is the top edge,
//! column 0 the left edge. A value of `0` is an empty cell; every other
//! value is a power of two no smaller than 2.
//!
//! ## Lines
//!
//! Moves operate on *lines*: rows for `Left`/`Right`, columns for `Up`/`Down`.
//! [`Board::line`] always returns a line ordered from index 0 (top or left),
//! regardless of direction; the engine decides whether to reverse it.
//!
//! `Board` is `Copy`. Every move produces a fresh board, so callers can hold
//! on to earlier boards freely.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::{BoardError, ParseDirectionError};

/// Side length of the board.
pub const BOARD_SIZE: usize = 4;

/// Number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A tile value. `0` is empty.
pub type Tile = u32;

/// Largest tile a board can hold. Two of these never merge.
pub const MAX_TILE: Tile = 1 << (Tile::BITS - 1);

/// Score values (cumulative sums of merge results).
pub type Score = u64;

/// A single row or column, ordered from index 0.
pub type Line = [Tile; BOARD_SIZE];

/// Direction to slide tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// True for `Up` and `Down`, which operate on columns.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// True when tiles slide toward index 0 of each line (`Up`, `Left`).
    #[must_use]
    pub const fn toward_start(self) -> bool {
        matches!(self, Direction::Up | Direction::Left)
    }

    /// Lowercase name of the direction.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts plain names (`"up"`), browser key names (`"ArrowUp"`) and
    /// WASD keys, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "arrowup" | "w" => Ok(Direction::Up),
            "down" | "arrowdown" | "s" => Ok(Direction::Down),
            "left" | "arrowleft" | "a" => Ok(Direction::Left),
            "right" | "arrowright" | "d" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// A 4x4 2048 board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Tile; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// The all-empty board.
    pub const EMPTY: Board = Board {
        cells: [[0; BOARD_SIZE]; BOARD_SIZE],
    };

    /// Create an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Build a board from rows, checking every tile value.
    pub fn from_rows(rows: [[Tile; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self, BoardError> {
        let board = Self { cells: rows };
        board.validate()?;
        Ok(board)
    }

    /// Build a board from a slice of rows of arbitrary shape.
    ///
    /// Fails if the shape is not 4x4 or a value is not a valid tile.
    pub fn from_slices<R: AsRef<[Tile]>>(rows: &[R]) -> Result<Self, BoardError> {
        if rows.len() != BOARD_SIZE {
            return Err(BoardError::RowCount {
                expected: BOARD_SIZE,
                found: rows.len(),
            });
        }

        let mut cells = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != BOARD_SIZE {
                return Err(BoardError::RowLength {
                    row: r,
                    expected: BOARD_SIZE,
                    found: row.len(),
                });
            }
            cells[r].copy_from_slice(row);
        }

        Self::from_rows(cells)
    }

    /// Check that every non-zero value is a power of two, at least 2.
    pub fn validate(&self) -> Result<(), BoardError> {
        for (row, values) in self.cells.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(BoardError::InvalidTile { row, col, value });
                }
            }
        }
        Ok(())
    }

    /// Rows of the board, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[[Tile; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Tile at `(row, col)`, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Write a tile. Callers inside the crate keep the tile invariant.
    pub(crate) fn set(&mut self, row: usize, col: usize, value: Tile) {
        debug_assert!(is_valid_tile(value), "invalid tile value {value}");
        self.cells[row][col] = value;
    }

    /// Extract line `index` for a move in `direction`, ordered from index 0.
    #[must_use]
    pub fn line(&self, index: usize, direction: Direction) -> Line {
        if direction.is_vertical() {
            std::array::from_fn(|row| self.cells[row][index])
        } else {
            self.cells[index]
        }
    }

    /// Write back a line produced for `direction`.
    pub(crate) fn set_line(&mut self, index: usize, direction: Direction, line: Line) {
        if direction.is_vertical() {
            for (row, value) in line.into_iter().enumerate() {
                self.cells[row][index] = value;
            }
        } else {
            self.cells[index] = line;
        }
    }

    /// Coordinates of every empty cell, row-major.
    #[must_use]
    pub fn empty_cells(&self) -> SmallVec<[(usize, usize); CELL_COUNT]> {
        let mut cells = SmallVec::new();
        for (row, values) in self.cells.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if value == 0 {
                    cells.push((row, col));
                }
            }
        }
        cells
    }

    /// Number of empty cells.
    #[must_use]
    pub fn count_empty(&self) -> usize {
        self.tiles().filter(|&t| t == 0).count()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        CELL_COUNT - self.count_empty()
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn tile_sum(&self) -> Score {
        self.tiles().map(Score::from).sum()
    }

    /// Largest tile on the board (0 for an empty board).
    #[must_use]
    pub fn highest_tile(&self) -> Tile {
        self.tiles().max().unwrap_or(0)
    }

    /// True when no cell is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.tiles().all(|t| t != 0)
    }

    /// Iterate over all cell values, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }
}

/// A valid cell value: empty, or a power of two from 2 up to [`MAX_TILE`].
#[must_use]
pub fn is_valid_tile(value: Tile) -> bool {
    value == 0 || ((2..=MAX_TILE).contains(&value) && value.is_power_of_two())
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, &value) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                if value == 0 {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{value:>5}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("ArrowDown".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!("A".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(" right ".parse::<Direction>(), Ok(Direction::Right));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_display_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(dir.to_string().parse::<Direction>(), Ok(dir));
        }
    }

    #[test]
    fn test_direction_axes() {
        assert!(Direction::Up.is_vertical());
        assert!(!Direction::Left.is_vertical());
        assert!(Direction::Left.toward_start());
        assert!(!Direction::Down.toward_start());
    }

    #[test]
    fn test_from_rows_rejects_bad_tiles() {
        let mut rows = [[0; 4]; 4];
        rows[2][1] = 3;
        assert_eq!(
            Board::from_rows(rows),
            Err(BoardError::InvalidTile { row: 2, col: 1, value: 3 })
        );

        rows[2][1] = 1;
        assert!(Board::from_rows(rows).is_err());

        rows[2][1] = 1024;
        assert!(Board::from_rows(rows).is_ok());

        rows[2][1] = MAX_TILE;
        assert!(Board::from_rows(rows).is_ok());
        assert!(!is_valid_tile(Tile::MAX));
    }

    #[test]
    fn test_from_slices_shape() {
        let three_rows = vec![vec![0; 4]; 3];
        assert_eq!(
            Board::from_slices(&three_rows),
            Err(BoardError::RowCount { expected: 4, found: 3 })
        );

        let mut ragged = vec![vec![0; 4]; 4];
        ragged[1].push(2);
        assert_eq!(
            Board::from_slices(&ragged),
            Err(BoardError::RowLength { row: 1, expected: 4, found: 5 })
        );
    }

    #[test]
    fn test_line_extraction() {
        let board = Board::from_rows([
            [2, 4, 8, 16],
            [0, 0, 0, 0],
            [32, 0, 0, 0],
            [0, 0, 0, 2],
        ])
        .unwrap();

        assert_eq!(board.line(0, Direction::Left), [2, 4, 8, 16]);
        assert_eq!(board.line(0, Direction::Right), [2, 4, 8, 16]);
        assert_eq!(board.line(0, Direction::Up), [2, 0, 32, 0]);
        assert_eq!(board.line(3, Direction::Down), [16, 0, 0, 2]);
    }

    #[test]
    fn test_set_line_column() {
        let mut board = Board::new();
        board.set_line(2, Direction::Up, [4, 2, 0, 0]);
        assert_eq!(board.get(0, 2), Some(4));
        assert_eq!(board.get(1, 2), Some(2));
        assert_eq!(board.get(2, 2), Some(0));
    }

    #[test]
    fn test_counts() {
        let board = Board::from_rows([
            [2, 0, 0, 0],
            [0, 4, 0, 0],
            [0, 0, 8, 0],
            [0, 0, 0, 0],
        ])
        .unwrap();

        assert_eq!(board.count_empty(), 13);
        assert_eq!(board.tile_count(), 3);
        assert_eq!(board.tile_sum(), 14);
        assert_eq!(board.highest_tile(), 8);
        assert!(!board.is_full());
        assert_eq!(board.empty_cells().len(), 13);
        assert_eq!(board.empty_cells()[0], (0, 1));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let board = Board::new();
        assert_eq!(board.get(0, 0), Some(0));
        assert_eq!(board.get(4, 0), None);
        assert_eq!(board.get(0, 4), None);
    }

    #[test]
    fn test_display() {
        let board = Board::from_rows([
            [2, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 2048],
        ])
        .unwrap();

        let text = board.to_string();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().next().unwrap().contains('2'));
        assert!(text.ends_with("2048"));
    }
}
