//! Python bindings for the rust-2048 engine.
//!
//! # Quick Start
//!
//! ```python
//! import rust_2048
//!
//! session = rust_2048.Session(seed=42)
//! session.apply("left")
//! print(session.score, session.board)
//!
//! rows, delta, changed = rust_2048.shift_board(session.board, "up")
//! ```

use pyo3::prelude::*;

mod py_session;

pub use py_session::*;

/// rust-2048: a deterministic 2048 engine.
#[pymodule]
fn rust_2048(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySession>()?;
    m.add_function(wrap_pyfunction!(py_session::shift_board, m)?)?;
    m.add_function(wrap_pyfunction!(py_session::board_is_game_over, m)?)?;

    Ok(())
}
