//! Session and board bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::core::{Board, Direction, SessionConfig, Tile};
use crate::rules;
use crate::session::{GameSession, NullStore, SessionSnapshot};

fn parse_direction(name: &str) -> PyResult<Direction> {
    name.parse::<Direction>()
        .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))
}

fn parse_board(rows: Vec<Vec<Tile>>) -> PyResult<Board> {
    Board::from_slices(&rows).map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))
}

fn rows_of(board: &Board) -> Vec<Vec<Tile>> {
    board.rows().iter().map(|row| row.to_vec()).collect()
}

/// Slide a board without spawning.
///
/// Returns `(rows, score_delta, changed)`.
#[pyfunction]
pub fn shift_board(rows: Vec<Vec<Tile>>, direction: &str) -> PyResult<(Vec<Vec<Tile>>, u64, bool)> {
    let board = parse_board(rows)?;
    let outcome = rules::shift(&board, parse_direction(direction)?);
    Ok((rows_of(&outcome.board), outcome.score_delta, outcome.changed))
}

/// True when no move can change the board.
#[pyfunction]
pub fn board_is_game_over(rows: Vec<Vec<Tile>>) -> PyResult<bool> {
    Ok(rules::is_game_over(&parse_board(rows)?))
}

/// Python wrapper for an offline GameSession.
#[pyclass(name = "Session")]
pub struct PySession {
    inner: GameSession<NullStore>,
}

#[pymethods]
impl PySession {
    /// Start a session. A missing seed picks one at random.
    #[new]
    #[pyo3(signature = (seed=None))]
    fn new(seed: Option<u64>) -> Self {
        let config = match seed {
            Some(seed) => SessionConfig::seeded(seed),
            None => SessionConfig::default(),
        };
        Self {
            inner: GameSession::new(config, NullStore),
        }
    }

    /// Resume from bytes produced by `snapshot()`.
    #[staticmethod]
    fn from_snapshot(bytes: &[u8]) -> PyResult<Self> {
        let snapshot = SessionSnapshot::from_bytes(bytes)
            .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?;
        let inner = GameSession::restore(&snapshot, SessionConfig::seeded(snapshot.rng.seed), NullStore)
            .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Play a move ("up", "ArrowLeft", "d", ...). Returns whether the board changed.
    fn apply(&mut self, direction: &str) -> PyResult<bool> {
        Ok(self.inner.apply(parse_direction(direction)?).changed)
    }

    /// Whether a move would change the board.
    fn can_move(&self, direction: &str) -> PyResult<bool> {
        Ok(self.inner.can_move(parse_direction(direction)?))
    }

    fn restart(&mut self) {
        self.inner.restart();
    }

    /// Encode the session as bytes.
    fn snapshot<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = self
            .inner
            .snapshot()
            .to_bytes()
            .map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    #[getter]
    fn board(&self) -> Vec<Vec<Tile>> {
        rows_of(self.inner.board())
    }

    #[getter]
    fn score(&self) -> u64 {
        self.inner.score()
    }

    #[getter]
    fn high_score(&self) -> u64 {
        self.inner.high_score()
    }

    #[getter]
    fn game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    #[getter]
    fn moves(&self) -> u32 {
        self.inner.moves()
    }

    fn __repr__(&self) -> String {
        format!(
            "Session(score={}, high_score={}, game_over={})",
            self.inner.score(),
            self.inner.high_score(),
            self.inner.is_game_over()
        )
    }

    fn __str__(&self) -> String {
        self.inner.board().to_string()
    }
}
