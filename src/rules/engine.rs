//! Slide, merge and spawn.
//!
//! ## Canonical direction
//!
//! Merging is only implemented "toward index 0" ([`collapse_line`]). `Down`
//! and `Right` reverse each line first and reverse the result back, so all
//! four directions share one algorithm.
//!
//! ## Merge rule
//!
//! One left-to-right pass over the compacted line. Equal neighbors merge
//! into their sum and the scan resumes after the pair, so each tile merges
//! at most once per move: `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]`, and
//! `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`.

use log::debug;
use smallvec::SmallVec;

use crate::core::board::{Board, Direction, Line, Score, Tile, BOARD_SIZE, MAX_TILE};
use crate::core::rng::TileSource;

/// A tile placed by the spawner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawn {
    pub row: usize,
    pub col: usize,
    pub value: Tile,
}

/// Result of sliding the board in one direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Board after the move (and after the spawn, for [`apply_move`]).
    pub board: Board,
    /// Sum of all merge results produced by this move.
    pub score_delta: Score,
    /// Whether any cell changed value.
    pub changed: bool,
    /// Tile placed after the move. Always `None` for [`shift`].
    pub spawned: Option<Spawn>,
}

/// Compact and merge one line toward index 0.
///
/// Returns the new line and the score earned by its merges. A pair of
/// [`MAX_TILE`] tiles stays unmerged.
#[must_use]
pub fn collapse_line(line: Line) -> (Line, Score) {
    let tiles: SmallVec<[Tile; BOARD_SIZE]> = line.iter().copied().filter(|&t| t != 0).collect();

    let mut out = [0; BOARD_SIZE];
    let mut score = 0;
    let mut write = 0;
    let mut read = 0;

    while read < tiles.len() {
        let tile = tiles[read];
        if tiles.get(read + 1) == Some(&tile) && mergeable(tile) {
            let merged = tile * 2;
            out[write] = merged;
            score += Score::from(merged);
            read += 2;
        } else {
            out[write] = tile;
            read += 1;
        }
        write += 1;
    }

    (out, score)
}

/// Whether two equal tiles of this value combine.
#[inline]
fn mergeable(tile: Tile) -> bool {
    tile < MAX_TILE
}

/// Slide every line in `direction`. Pure: no tile is spawned.
#[must_use]
pub fn shift(board: &Board, direction: Direction) -> MoveOutcome {
    let mut next = *board;
    let mut score_delta = 0;
    let mut changed = false;

    for index in 0..BOARD_SIZE {
        let before = board.line(index, direction);

        let mut canonical = before;
        if !direction.toward_start() {
            canonical.reverse();
        }

        let (mut after, line_score) = collapse_line(canonical);
        if !direction.toward_start() {
            after.reverse();
        }

        changed |= after != before;
        score_delta += line_score;
        next.set_line(index, direction, after);
    }

    MoveOutcome {
        board: next,
        score_delta,
        changed,
        spawned: None,
    }
}

/// Slide in `direction`, then spawn one tile if anything changed.
///
/// A move that changes nothing returns the input board untouched.
pub fn apply_move<R: TileSource + ?Sized>(
    board: &Board,
    direction: Direction,
    source: &mut R,
) -> MoveOutcome {
    let mut outcome = shift(board, direction);

    if outcome.changed {
        outcome.spawned = place_random_tile(&mut outcome.board, source);
    } else {
        debug!("move {direction} changed nothing; no spawn");
    }

    outcome
}

/// Place a 2 (90%) or 4 (10%) in a uniformly chosen empty cell.
///
/// Returns `None` and leaves the board alone when it is full.
pub fn place_random_tile<R: TileSource + ?Sized>(
    board: &mut Board,
    source: &mut R,
) -> Option<Spawn> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }

    let ordinal = source.pick_cell(empty.len());
    debug_assert!(
        ordinal < empty.len(),
        "pick_cell returned {ordinal} for {} empty cells",
        empty.len()
    );
    let (row, col) = empty[ordinal.min(empty.len() - 1)];
    let value = source.spawn_value();
    board.set(row, col, value);

    Some(Spawn { row, col, value })
}

/// A fresh board with two random tiles.
pub fn initial_board<R: TileSource + ?Sized>(source: &mut R) -> Board {
    let mut board = Board::new();
    place_random_tile(&mut board, source);
    place_random_tile(&mut board, source);
    board
}

/// Whether sliding in `direction` would change the board.
#[must_use]
pub fn can_shift(board: &Board, direction: Direction) -> bool {
    (0..BOARD_SIZE).any(|index| {
        let mut line = board.line(index, direction);
        if !direction.toward_start() {
            line.reverse();
        }
        line_can_collapse(&line)
    })
}

/// A line can collapse toward index 0 if a gap precedes a tile or two
/// neighboring tiles (ignoring gaps) are equal.
fn line_can_collapse(line: &Line) -> bool {
    let mut seen_gap = false;
    let mut prev: Option<Tile> = None;

    for &tile in line {
        if tile == 0 {
            seen_gap = true;
            continue;
        }
        if seen_gap || (prev == Some(tile) && mergeable(tile)) {
            return true;
        }
        prev = Some(tile);
    }

    false
}

/// True when no direction can change the board.
///
/// Equivalent to: no empty cell and no equal horizontal or vertical
/// neighbors.
#[must_use]
pub fn is_game_over(board: &Board) -> bool {
    if !board.is_full() {
        return false;
    }

    let rows = board.rows();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let tile = rows[row][col];
            if !mergeable(tile) {
                continue;
            }
            if col + 1 < BOARD_SIZE && rows[row][col + 1] == tile {
                return false;
            }
            if row + 1 < BOARD_SIZE && rows[row + 1][col] == tile {
                return false;
            }
        }
    }

    true
}
