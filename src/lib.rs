//! # rust-2048
//!
//! A deterministic 2048 sliding-merge board engine.
//!
//! ## Design Principles
//!
//! 1. **Pure rules**: a move is a function of (board, direction) returning
//!    (board, score delta, changed). No UI, input or storage concerns.
//!
//! 2. **Injected randomness**: spawns go through the `TileSource` trait.
//!    A seeded ChaCha8 RNG replays games exactly; tests script decisions.
//!
//! 3. **Injected storage**: high scores go through the `ScoreStore` trait.
//!    A failing store never affects play.
//!
//! ## Modules
//!
//! - `core`: board, directions, RNG, configuration, boundary errors
//! - `rules`: slide/merge, spawning, game-over detection
//! - `session`: game sessions, score stores, snapshots
//!
//! ## Example
//!
//! ```
//! use rust_2048::{Direction, GameSession, NullStore, SessionConfig};
//!
//! let mut session = GameSession::new(SessionConfig::seeded(42), NullStore);
//! assert_eq!(session.board().tile_count(), 2);
//!
//! let report = session.apply(Direction::Left);
//! if report.changed {
//!     assert!(report.spawned.is_some());
//! }
//! println!("{}\nscore: {}", session.board(), session.score());
//! ```

pub mod core;
pub mod rules;
pub mod session;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Board, BoardError, Direction, GameRng, GameRngState, ParseDirectionError, Score,
    ScriptedTiles, SessionConfig, Tile, TileSource, BOARD_SIZE, MAX_TILE,
};

pub use crate::rules::{apply_move, can_shift, initial_board, is_game_over, shift, MoveOutcome, Spawn};

pub use crate::session::{
    GameSession, MemoryStore, MoveReport, NullStore, ScoreStore, ScoreStoreError, SessionSnapshot,
    SnapshotError,
};
