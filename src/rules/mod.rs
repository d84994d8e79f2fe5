//! The 2048 move rules.
//!
//! Everything here is a pure function of a board (plus a [`TileSource`]
//! where a spawn is involved). Sessions, renderers and score storage build
//! on these functions but never reach inside them.
//!
//! [`TileSource`]: crate::core::TileSource

pub mod engine;

pub use engine::{
    apply_move, can_shift, collapse_line, initial_board, is_game_over, place_random_tile, shift,
    MoveOutcome, Spawn,
};
