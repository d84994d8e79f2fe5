//! A single game of 2048.
//!
//! `GameSession` owns the board, the running score, the high score and the
//! game-over flag, together with the two injected capabilities: a
//! [`TileSource`] for spawns and a [`ScoreStore`] for records. One session
//! per player; sessions share nothing.

use log::{debug, info, warn};

use super::snapshot::{SessionSnapshot, SnapshotError};
use super::store::{ScoreStore, ScoreStoreError};
use crate::core::board::{Board, Direction, Score, Tile};
use crate::core::config::SessionConfig;
use crate::core::rng::{GameRng, TileSource};
use crate::rules::{self, Spawn};

/// What a call to [`GameSession::apply`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveReport {
    /// Whether the board changed. No spawn happens otherwise.
    pub changed: bool,
    /// Score earned by merges in this move.
    pub score_delta: Score,
    /// Tile placed after the move.
    pub spawned: Option<Spawn>,
    /// Set when this move pushed the score past the previous high score.
    pub new_high_score: Option<Score>,
    /// Whether the game is over after this move.
    pub game_over: bool,
}

/// A running game.
pub struct GameSession<S, R = GameRng> {
    board: Board,
    score: Score,
    high_score: Score,
    game_over: bool,
    moves: u32,
    /// A record exists that the store has not accepted yet.
    unsaved_record: bool,
    config: SessionConfig,
    source: R,
    store: S,
}

impl<S: ScoreStore> GameSession<S, GameRng> {
    /// Start a session with a seeded [`GameRng`].
    pub fn new(config: SessionConfig, store: S) -> Self {
        let rng = GameRng::new(config.seed);
        Self::with_source(config, store, rng)
    }

    /// Capture a resumable checkpoint.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board,
            score: self.score,
            high_score: self.high_score,
            game_over: self.game_over,
            moves: self.moves,
            rng: self.source.state(),
            unsaved_record: self.unsaved_record,
        }
    }

    /// Resume from a checkpoint.
    ///
    /// The stored high score is consulted again, so a record set elsewhere
    /// since the checkpoint is not lost. A snapshot record the store does
    /// not hold yet stays pending.
    pub fn restore(
        snapshot: &SessionSnapshot,
        config: SessionConfig,
        mut store: S,
    ) -> Result<Self, SnapshotError> {
        snapshot.validate()?;

        let stored = load_high_score(&mut store);
        let unsaved_record = snapshot.unsaved_record && snapshot.high_score > stored;
        Ok(Self {
            board: snapshot.board,
            score: snapshot.score,
            high_score: snapshot.high_score.max(stored),
            game_over: snapshot.game_over,
            moves: snapshot.moves,
            unsaved_record,
            config,
            source: GameRng::from_state(&snapshot.rng),
            store,
        })
    }
}

impl<S: ScoreStore, R: TileSource> GameSession<S, R> {
    /// Start a session drawing spawns from `source`.
    ///
    /// Loads the stored high score, then deals the opening board.
    pub fn with_source(config: SessionConfig, mut store: S, source: R) -> Self {
        let high_score = load_high_score(&mut store);

        let mut session = Self {
            board: Board::EMPTY,
            score: 0,
            high_score,
            game_over: false,
            moves: 0,
            unsaved_record: false,
            config,
            source,
            store,
        };
        session.initialize();
        session
    }

    /// Deal a fresh board with two tiles and reset the score.
    ///
    /// The high score survives.
    pub fn initialize(&mut self) {
        self.board = rules::initial_board(&mut self.source);
        self.score = 0;
        self.game_over = false;
        self.moves = 0;
        info!("new game, high score {}", self.high_score);
    }

    /// Start over, first saving any record the store has not accepted.
    pub fn restart(&mut self) {
        self.save_pending_record();
        self.initialize();
    }

    /// Play one move.
    pub fn apply(&mut self, direction: Direction) -> MoveReport {
        let outcome = rules::apply_move(&self.board, direction, &mut self.source);

        if !outcome.changed {
            return MoveReport {
                changed: false,
                score_delta: 0,
                spawned: None,
                new_high_score: None,
                game_over: self.game_over,
            };
        }

        self.board = outcome.board;
        self.moves += 1;
        self.score += outcome.score_delta;
        debug!(
            "move {} #{}: +{} -> {}",
            direction, self.moves, outcome.score_delta, self.score
        );

        let new_high_score = if self.score > self.high_score {
            self.high_score = self.score;
            self.unsaved_record = true;
            if self.config.submit_every_record {
                self.save_pending_record();
            }
            Some(self.score)
        } else {
            None
        };

        self.game_over = rules::is_game_over(&self.board);
        if self.game_over {
            info!(
                "game over after {} moves: score {}, highest tile {}",
                self.moves,
                self.score,
                self.board.highest_tile()
            );
            self.save_pending_record();
        }

        MoveReport {
            changed: true,
            score_delta: outcome.score_delta,
            spawned: outcome.spawned,
            new_high_score,
            game_over: self.game_over,
        }
    }

    /// Submit a record the store has not accepted yet.
    ///
    /// Returns `Ok(true)` if something was submitted, `Ok(false)` if there
    /// was nothing to do.
    pub fn flush_high_score(&mut self) -> Result<bool, ScoreStoreError> {
        if !self.unsaved_record {
            return Ok(false);
        }
        self.store.submit_high_score(self.high_score)?;
        self.unsaved_record = false;
        Ok(true)
    }

    fn save_pending_record(&mut self) {
        if let Err(err) = self.flush_high_score() {
            warn!("could not save high score {}: {}", self.high_score, err);
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> Score {
        self.high_score
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Moves that changed the board since the last (re)start.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn highest_tile(&self) -> Tile {
        self.board.highest_tile()
    }

    /// True when a record is waiting to be accepted by the store.
    #[must_use]
    pub fn has_unsaved_record(&self) -> bool {
        self.unsaved_record
    }

    /// Whether `direction` would change the board.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        rules::can_shift(&self.board, direction)
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Tear down the session, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }
}

/// Read the stored high score, treating failure as "no record".
fn load_high_score<S: ScoreStore>(store: &mut S) -> Score {
    match store.fetch_high_score() {
        Ok(score) => score.unwrap_or(0),
        Err(err) => {
            warn!("could not load high score, starting from 0: {}", err);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedTiles;
    use crate::session::store::{MemoryStore, NullStore};

    fn scripted(script: &[(usize, Tile)]) -> GameSession<MemoryStore, ScriptedTiles> {
        GameSession::with_source(
            SessionConfig::seeded(0),
            MemoryStore::new(),
            ScriptedTiles::new(script.iter().copied()),
        )
    }

    #[test]
    fn test_new_session_has_two_tiles() {
        let session = GameSession::new(SessionConfig::seeded(42), NullStore);

        assert_eq!(session.board().tile_count(), 2);
        assert!(session.board().tiles().all(|t| t == 0 || t == 2 || t == 4));
        assert_eq!(session.score(), 0);
        assert_eq!(session.moves(), 0);
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_merge_scores_and_records() {
        // Opening tiles at (0,0) and (0,1), both 2
        let mut session = scripted(&[(0, 2), (0, 2), (0, 2)]);
        assert_eq!(session.board().rows()[0], [2, 2, 0, 0]);

        let report = session.apply(Direction::Left);

        assert!(report.changed);
        assert_eq!(report.score_delta, 4);
        assert_eq!(report.new_high_score, Some(4));
        assert_eq!(session.score(), 4);
        assert_eq!(session.high_score(), 4);
        assert_eq!(session.moves(), 1);
        assert_eq!(session.store().submissions(), &[4]);
        assert!(!session.has_unsaved_record());
    }

    #[test]
    fn test_noop_move() {
        let mut session = scripted(&[(0, 2), (0, 4)]);
        let before = *session.board();

        let report = session.apply(Direction::Left);

        assert!(!report.changed);
        assert_eq!(report.spawned, None);
        assert_eq!(*session.board(), before);
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn test_loads_high_score() {
        let session = GameSession::new(SessionConfig::seeded(1), MemoryStore::with_high_score(500));
        assert_eq!(session.high_score(), 500);
        assert_eq!(session.config().seed, 1);

        let store = session.into_store();
        assert!(store.submissions().is_empty());
    }

    #[test]
    fn test_offline_store_keeps_playing() {
        let mut store = MemoryStore::with_high_score(500);
        store.set_offline(true);

        let mut session = GameSession::with_source(
            SessionConfig::seeded(0),
            store,
            ScriptedTiles::new([(0, 2), (0, 2)]),
        );
        assert_eq!(session.high_score(), 0);

        let report = session.apply(Direction::Left);
        assert_eq!(report.new_high_score, Some(4));
        assert_eq!(session.score(), 4);
        assert!(session.has_unsaved_record());

        session.store_mut().set_offline(false);
        assert_eq!(session.flush_high_score(), Ok(true));
        assert_eq!(session.flush_high_score(), Ok(false));
        assert_eq!(session.store().submissions(), &[4]);
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut session = scripted(&[(0, 2), (0, 2), (0, 2), (0, 2), (1, 2)]);
        session.apply(Direction::Left);
        assert_eq!(session.high_score(), 4);

        session.restart();

        assert_eq!(session.score(), 0);
        assert_eq!(session.high_score(), 4);
        assert_eq!(session.moves(), 0);
        assert_eq!(session.board().tile_count(), 2);
    }
}
