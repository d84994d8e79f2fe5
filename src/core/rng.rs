//! Tile spawn randomness.
//!
//! ## Key Features
//!
//! - **Injectable**: the engine only sees the [`TileSource`] trait, which
//!   answers two questions: which empty cell, and 2 or 4
//! - **Deterministic**: [`GameRng`] with the same seed replays the same game
//! - **Serializable**: O(1) state capture and restore via [`GameRngState`]
//! - **Scriptable**: [`ScriptedTiles`] feeds fixed decisions for tests
//!
//! ## Usage
//!
//! ```
//! use rust_2048::core::{GameRng, TileSource};
//!
//! let mut rng = GameRng::new(42);
//! let cell = rng.pick_cell(16);
//! assert!(cell < 16);
//!
//! // Same seed, same decisions
//! let mut again = GameRng::new(42);
//! assert_eq!(again.pick_cell(16), cell);
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::board::Tile;

/// Probability that a spawned tile is a 4 rather than a 2.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// Source of spawn decisions.
///
/// `pick_cell` is called first with the number of empty cells (always at
/// least 1) and must return an index in `0..empty`. `spawn_four` is then
/// called once to choose the tile value.
pub trait TileSource {
    /// Choose one of `empty` empty cells, uniformly for real sources.
    fn pick_cell(&mut self, empty: usize) -> usize;

    /// Return true to spawn a 4, false to spawn a 2.
    fn spawn_four(&mut self) -> bool;

    /// Value of the next spawned tile.
    fn spawn_value(&mut self) -> Tile {
        if self.spawn_four() {
            4
        } else {
            2
        }
    }
}

impl<T: TileSource + ?Sized> TileSource for &mut T {
    fn pick_cell(&mut self, empty: usize) -> usize {
        (**self).pick_cell(empty)
    }

    fn spawn_four(&mut self) -> bool {
        (**self).spawn_four()
    }
}

/// Deterministic seeded RNG.
///
/// Uses ChaCha8 for speed and reproducibility across platforms.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl TileSource for GameRng {
    fn pick_cell(&mut self, empty: usize) -> usize {
        self.gen_range_usize(0..empty)
    }

    fn spawn_four(&mut self) -> bool {
        self.gen_bool(FOUR_PROBABILITY)
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position, so capture and restore cost the same no
/// matter how many numbers have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// A fixed script of spawn decisions.
///
/// Each entry is `(ordinal, value)`: the ordinal indexes the board's empty
/// cells in row-major order and the value is 2 or 4. Ordinals past the end
/// clamp to the last empty cell. Once the script runs out, every spawn is a
/// 2 in the first empty cell.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTiles {
    script: VecDeque<(usize, Tile)>,
    pending: Tile,
}

impl ScriptedTiles {
    /// Create a script from `(ordinal, value)` pairs.
    pub fn new(script: impl IntoIterator<Item = (usize, Tile)>) -> Self {
        Self {
            script: script.into_iter().collect(),
            pending: 2,
        }
    }

    /// Append a decision to the end of the script.
    pub fn push(&mut self, ordinal: usize, value: Tile) {
        self.script.push_back((ordinal, value));
    }

    /// Decisions not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl TileSource for ScriptedTiles {
    fn pick_cell(&mut self, empty: usize) -> usize {
        let (ordinal, value) = self.script.pop_front().unwrap_or((0, 2));
        self.pending = value;
        ordinal.min(empty.saturating_sub(1))
    }

    fn spawn_four(&mut self) -> bool {
        self.pending == 4
    }
}
