//! Boundary error types for board construction and input parsing.

use super::board::Tile;

/// A caller-supplied board that breaks the tile invariant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid tile {value} at ({row}, {col}): tiles must be 0 or a power of two >= 2")]
    InvalidTile { row: usize, col: usize, value: Tile },
}

/// An unrecognized direction name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction: {0:?}")]
pub struct ParseDirectionError(pub String);
