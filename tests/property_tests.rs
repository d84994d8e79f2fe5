//! Property tests for the move rules.

use proptest::prelude::*;

use rust_2048::core::{Board, Direction, GameRng, Tile};
use rust_2048::rules::{apply_move, can_shift, collapse_line, is_game_over, shift};

fn tile() -> impl Strategy<Value = Tile> {
    // Mostly empty or small tiles so merges are common
    prop_oneof![
        3 => Just(0u32),
        5 => (1u32..=4).prop_map(|e| 1u32 << e),
        1 => (5u32..=11).prop_map(|e| 1u32 << e),
    ]
}

fn board() -> impl Strategy<Value = Board> {
    prop::array::uniform4(prop::array::uniform4(tile()))
        .prop_map(|rows| Board::from_rows(rows).expect("generated tiles are valid"))
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    #[test]
    fn merge_conserves_tile_sum(b in board(), dir in direction()) {
        let out = shift(&b, dir);
        prop_assert_eq!(out.board.tile_sum(), b.tile_sum() + out.score_delta);
    }

    #[test]
    fn unchanged_board_is_stable(b in board(), dir in direction()) {
        let first = shift(&b, dir);
        let second = shift(&first.board, dir);
        if !second.changed {
            prop_assert_eq!(second.board, first.board);
        }
        if !first.changed {
            prop_assert_eq!(first.board, b);
            prop_assert!(!second.changed);
        }
    }

    #[test]
    fn changed_flag_matches_board(b in board(), dir in direction()) {
        let out = shift(&b, dir);
        prop_assert_eq!(out.changed, out.board != b);
        prop_assert_eq!(can_shift(&b, dir), out.changed);
    }

    #[test]
    fn no_phantom_spawn(b in board(), dir in direction(), seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        let shifted = shift(&b, dir);
        let out = apply_move(&b, dir, &mut rng);

        if out.changed {
            prop_assert_eq!(out.board.tile_count(), shifted.board.tile_count() + 1);
            let spawn = out.spawned.expect("changed move spawns");
            prop_assert!(spawn.value == 2 || spawn.value == 4);
            prop_assert_eq!(shifted.board.get(spawn.row, spawn.col), Some(0));
        } else {
            prop_assert_eq!(out.board.tile_count(), b.tile_count());
            prop_assert!(out.spawned.is_none());
        }
    }

    #[test]
    fn game_over_iff_no_direction_moves(b in board()) {
        let stuck = Direction::ALL.iter().all(|&dir| !shift(&b, dir).changed);
        prop_assert_eq!(is_game_over(&b), stuck && b.is_full());
    }

    #[test]
    fn results_stay_valid(b in board(), dir in direction()) {
        let out = shift(&b, dir);
        prop_assert!(out.board.validate().is_ok());
        prop_assert!(out.board.tile_count() <= b.tile_count());
    }

    #[test]
    fn collapsed_line_is_packed(line in prop::array::uniform4(tile())) {
        let (out, _) = collapse_line(line);
        let first_gap = out.iter().position(|&t| t == 0).unwrap_or(out.len());
        prop_assert!(out[first_gap..].iter().all(|&t| t == 0));
    }
}
