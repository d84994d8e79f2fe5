//! Core engine types: board, directions, RNG, configuration, errors.
//!
//! Nothing here knows about sessions or score storage. The rules module
//! builds the move algorithm on top of these types.

pub mod board;
pub mod config;
pub mod error;
pub mod rng;

pub use board::{
    is_valid_tile, Board, Direction, Line, Score, Tile, BOARD_SIZE, CELL_COUNT,
    MAX_TILE,
};
pub use config::SessionConfig;
pub use error::{BoardError, ParseDirectionError};
pub use rng::{GameRng, GameRngState, ScriptedTiles, TileSource, FOUR_PROBABILITY};
