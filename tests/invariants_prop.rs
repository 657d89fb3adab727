//! Property tests for board and match invariants.
//!
//! Random boards and random action streams are generated; the properties below must hold
//! for every one of them.

use proptest::prelude::*;
use tetris_versus::core::input::ActionSnapshot;
use tetris_versus::core::{Board, Match, MatchConfig, Piece, Randomizer, SimpleRng};
use tetris_versus::types::{Action, CellKind, PieceKind, Rotation};

fn board_from_bits(bits: &[bool]) -> Board {
    let mut board = Board::new();
    for (i, &filled) in bits.iter().enumerate() {
        if filled {
            board.set((i % 10) as i8, (i / 10) as i8, Some(CellKind::Garbage));
        }
    }
    board
}

fn assert_active_is_valid(game: &Match) {
    if let Some(active) = game.active() {
        assert!(game.board().is_valid_position(&active));
    }
}

proptest! {
    #[test]
    fn valid_position_matches_definition(
        bits in proptest::collection::vec(any::<bool>(), 200),
        kind_i in 0usize..7,
        rot_i in 0u8..4,
        x in -4i8..12,
        y in -4i8..22,
    ) {
        let board = board_from_bits(&bits);
        let piece = Piece::at(PieceKind::ALL[kind_i], x, y, Rotation::from_index(rot_i));

        let expected = piece.cells().iter().all(|&(cx, cy)| {
            (0..10).contains(&cx)
                && cy < 20
                && (cy < 0 || !bits[cy as usize * 10 + cx as usize])
        });
        prop_assert_eq!(board.is_valid_position(&piece), expected);
    }

    #[test]
    fn clearing_removes_exactly_the_full_rows(
        bits in proptest::collection::vec(any::<bool>(), 200),
        full_rows in proptest::collection::vec(0usize..20, 0..6),
    ) {
        let mut bits = bits;
        for &y in &full_rows {
            for x in 0..10 {
                bits[y * 10 + x] = true;
            }
        }
        let mut board = board_from_bits(&bits);
        let before = board.filled_count();

        let full: Vec<usize> = (0..20).filter(|&y| board.is_row_full(y)).collect();
        let survivors: Vec<Vec<bool>> = (0..20)
            .filter(|y| !full.contains(y))
            .map(|y| board.row(y).expect("row in range").iter().map(|c| c.is_some()).collect())
            .collect();

        let cleared = board.clear_lines();
        prop_assert_eq!(cleared.as_slice(), full.as_slice());
        prop_assert_eq!(board.filled_count(), before - full.len() * 10);

        // Surviving rows keep their order at the bottom of the board.
        let offset = 20 - survivors.len();
        for (i, row) in survivors.iter().enumerate() {
            let now: Vec<bool> = board
                .row(offset + i)
                .expect("row in range")
                .iter()
                .map(|c| c.is_some())
                .collect();
            prop_assert_eq!(&now, row);
        }
    }

    #[test]
    fn garbage_keeps_height_and_one_gap_per_row(
        bits in proptest::collection::vec(any::<bool>(), 200),
        count in 0usize..30,
        seed in any::<u32>(),
    ) {
        let mut board = board_from_bits(&bits);
        let mut rng = SimpleRng::new(seed);
        board.add_garbage_lines(count, &mut rng);

        prop_assert_eq!(board.cells().len(), 200);
        let added = count.min(20);
        for y in 20 - added..20 {
            let gaps = board.row(y).expect("row in range").iter().filter(|c| c.is_none()).count();
            prop_assert_eq!(gaps, 1);
        }
    }

    #[test]
    fn random_play_keeps_match_invariants(
        seed in any::<u32>(),
        bag in any::<bool>(),
        steps in proptest::collection::vec((0usize..7, 1u32..200), 1..150),
    ) {
        let config = MatchConfig {
            randomizer: if bag { Randomizer::SevenBag } else { Randomizer::Uniform },
            ..MatchConfig::default()
        };
        let mut game = Match::with_config(seed, config);
        let mut last_level = game.level();
        let mut last_lines = game.lines();
        let mut last_score = game.score();

        for (action_i, dt) in steps {
            let events = game.update(&ActionSnapshot::single(Action::ALL[action_i]), dt);

            assert_active_is_valid(&game);
            prop_assert!(game.level() >= last_level);
            prop_assert!(game.lines() >= last_lines);
            prop_assert!(game.score() >= last_score);
            prop_assert_eq!(game.lines() - last_lines, events.lines_cleared);
            prop_assert!(game.level() >= 1);
            if let (Some(active), Some(ghost)) = (game.active(), game.ghost()) {
                prop_assert_eq!((ghost.x, ghost.rotation), (active.x, active.rotation));
                prop_assert!(ghost.y >= active.y);
                prop_assert!(!game.board().is_valid_position(&ghost.shifted(0, 1)));
            }

            last_level = game.level();
            last_lines = game.lines();
            last_score = game.score();
            if game.is_game_over() {
                prop_assert!(game.active().is_none());
                break;
            }
        }
    }
}
