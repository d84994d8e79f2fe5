//! Session configuration.

use serde::{Deserialize, Serialize};

/// Session configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seed for the spawn RNG.
    /// Same seed and same moves replay the same game.
    pub seed: u64,

    /// Submit every new record to the score store as soon as it happens.
    ///
    /// When false, records are held until game over or an explicit
    /// `flush_high_score`.
    pub submit_every_record: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: rand::random(),
            submit_every_record: true,
        }
    }
}

impl SessionConfig {
    /// Create a config with a fixed seed and default behavior.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Hold records until game over or an explicit flush.
    #[must_use]
    pub fn deferred_submission(mut self) -> Self {
        self.submit_every_record = false;
        self
    }
}
