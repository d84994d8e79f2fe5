//! Serializable session checkpoints.
//!
//! A snapshot holds everything needed to resume a game: the board, the
//! scores, the game-over flag, the move counter, the RNG position and
//! whether the high score still awaits saving. A
//! session restored from a snapshot spawns the same tiles the original
//! would have.

use serde::{Deserialize, Serialize};

use crate::core::board::{Board, Score};
use crate::core::error::BoardError;
use crate::core::rng::GameRngState;
use crate::rules;

/// Failure encoding, decoding or restoring a snapshot.
#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),
    #[error("snapshot holds an invalid board: {0}")]
    InvalidBoard(#[from] BoardError),
    #[error("snapshot score {score} exceeds its high score {high_score}")]
    ScoreAboveHighScore { score: Score, high_score: Score },
    #[error("snapshot game-over flag is {recorded} but the board says otherwise")]
    GameOverMismatch { recorded: bool },
}

/// A resumable checkpoint of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub board: Board,
    pub score: Score,
    pub high_score: Score,
    pub game_over: bool,
    pub moves: u32,
    pub rng: GameRngState,
    /// The high score had not been accepted by the store yet.
    #[serde(default)]
    pub unsaved_record: bool,
}

impl SessionSnapshot {
    /// Encode as compact bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode and validate bytes produced by [`SessionSnapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the board invariant, score ordering and game-over flag.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.board.validate()?;
        if self.score > self.high_score {
            return Err(SnapshotError::ScoreAboveHighScore {
                score: self.score,
                high_score: self.high_score,
            });
        }
        if self.game_over != rules::is_game_over(&self.board) {
            return Err(SnapshotError::GameOverMismatch {
                recorded: self.game_over,
            });
        }
        Ok(())
    }
}
