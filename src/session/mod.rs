//! Game sessions: the rules plus injected randomness and score storage.
//!
//! - [`GameSession`]: board, score, high score and game-over flag
//! - [`ScoreStore`]: where high scores come from and go to
//! - [`SessionSnapshot`]: resumable checkpoints

pub mod game;
pub mod snapshot;
pub mod store;

pub use game::{GameSession, MoveReport};
pub use snapshot::{SessionSnapshot, SnapshotError};
pub use store::{MemoryStore, NullStore, ScoreStore, ScoreStoreError};
