//! High score storage capability.
//!
//! The session reads the stored record once at startup and writes a new
//! value whenever the running score beats it. Where and how the value is
//! kept (keying, authentication, transport) is up to the implementation.
//! Store failures never touch board state: the session logs them and keeps
//! playing offline.

use crate::core::board::Score;

/// Failure reported by a score store.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreStoreError {
    #[error("score store unavailable: {0}")]
    Unavailable(String),
    #[error("score store rejected {score}: {reason}")]
    Rejected { score: Score, reason: String },
}

/// Where high scores are read from and written to.
pub trait ScoreStore {
    /// Previously recorded high score, if any.
    fn fetch_high_score(&mut self) -> Result<Option<Score>, ScoreStoreError>;

    /// Record a new high score.
    fn submit_high_score(&mut self, score: Score) -> Result<(), ScoreStoreError>;
}

impl<T: ScoreStore + ?Sized> ScoreStore for &mut T {
    fn fetch_high_score(&mut self) -> Result<Option<Score>, ScoreStoreError> {
        (**self).fetch_high_score()
    }

    fn submit_high_score(&mut self, score: Score) -> Result<(), ScoreStoreError> {
        (**self).submit_high_score(score)
    }
}

impl<T: ScoreStore + ?Sized> ScoreStore for Box<T> {
    fn fetch_high_score(&mut self) -> Result<Option<Score>, ScoreStoreError> {
        (**self).fetch_high_score()
    }

    fn submit_high_score(&mut self, score: Score) -> Result<(), ScoreStoreError> {
        (**self).submit_high_score(score)
    }
}

/// A store that remembers nothing. For offline and anonymous play.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStore;

impl ScoreStore for NullStore {
    fn fetch_high_score(&mut self) -> Result<Option<Score>, ScoreStoreError> {
        Ok(None)
    }

    fn submit_high_score(&mut self, _score: Score) -> Result<(), ScoreStoreError> {
        Ok(())
    }
}

/// In-memory store that keeps the best score and every submission.
///
/// Can be switched offline to exercise failure handling.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    best: Option<Score>,
    submissions: Vec<Score>,
    offline: bool,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with a high score.
    #[must_use]
    pub fn with_high_score(score: Score) -> Self {
        Self {
            best: Some(score),
            ..Self::default()
        }
    }

    /// Make every call fail with [`ScoreStoreError::Unavailable`].
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Best score accepted so far.
    #[must_use]
    pub fn best(&self) -> Option<Score> {
        self.best
    }

    /// Every accepted submission, in order.
    #[must_use]
    pub fn submissions(&self) -> &[Score] {
        &self.submissions
    }

    fn check_online(&self) -> Result<(), ScoreStoreError> {
        if self.offline {
            Err(ScoreStoreError::Unavailable("store is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl ScoreStore for MemoryStore {
    fn fetch_high_score(&mut self) -> Result<Option<Score>, ScoreStoreError> {
        self.check_online()?;
        Ok(self.best)
    }

    fn submit_high_score(&mut self, score: Score) -> Result<(), ScoreStoreError> {
        self.check_online()?;
        self.submissions.push(score);
        self.best = Some(self.best.map_or(score, |best| best.max(score)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_store() {
        let mut store = NullStore;
        assert_eq!(store.fetch_high_score(), Ok(None));
        assert_eq!(store.submit_high_score(100), Ok(()));
        assert_eq!(store.fetch_high_score(), Ok(None));
    }

    #[test]
    fn test_memory_store_keeps_best() {
        let mut store = MemoryStore::with_high_score(50);
        assert_eq!(store.fetch_high_score(), Ok(Some(50)));

        store.submit_high_score(80).unwrap();
        store.submit_high_score(60).unwrap();

        assert_eq!(store.best(), Some(80));
        assert_eq!(store.submissions(), &[80, 60]);
    }

    #[test]
    fn test_memory_store_offline() {
        let mut store = MemoryStore::new();
        store.set_offline(true);

        assert!(matches!(
            store.fetch_high_score(),
            Err(ScoreStoreError::Unavailable(_))
        ));
        assert!(store.submit_high_score(10).is_err());
        assert!(store.submissions().is_empty());

        store.set_offline(false);
        assert_eq!(store.submit_high_score(10), Ok(()));
    }

    #[test]
    fn test_boxed_store() {
        let mut store: Box<dyn ScoreStore> = Box::new(MemoryStore::with_high_score(7));
        assert_eq!(store.fetch_high_score(), Ok(Some(7)));
    }

    #[test]
    fn test_error_display() {
        let err = ScoreStoreError::Rejected {
            score: 12,
            reason: "not signed in".to_string(),
        };
        assert_eq!(err.to_string(), "score store rejected 12: not signed in");
    }
}
