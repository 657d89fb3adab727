//! Integration tests across the core, engine, and headless runner

use tetris_versus::core::input::ActionSnapshot;
use tetris_versus::core::{Board, Match, MatchConfig, MatchState, Piece};
use tetris_versus::engine::{apply_place, CpuPilot, Difficulty, MoveEvaluator, Outcome, Versus};
use tetris_versus::headless::{run_round, VersusConfig};
use tetris_versus::types::{Action, PieceKind};

#[test]
fn test_match_lifecycle() {
    let mut game = Match::new(12345);
    assert_eq!(game.state(), MatchState::Running);
    assert!(game.active().is_some());

    let initial = game.active().expect("active piece");
    let events = game.update(&ActionSnapshot::single(Action::MoveLeft), 16);
    if events.piece_moved {
        assert_eq!(game.active().map(|p| p.x), Some(initial.x - 1));
    }

    game.pause();
    assert!(game.update(&ActionSnapshot::single(Action::HardDrop), 16).is_empty());
    game.resume();

    let events = game.update(&ActionSnapshot::single(Action::HardDrop), 16);
    assert!(events.piece_locked);
    assert_eq!(game.stats().pieces_placed, 1);
}

#[test]
fn test_evaluator_on_empty_board_prefers_flat_placements() {
    let board = Board::new();
    let piece = Piece::new(PieceKind::O);

    let mut eval = MoveEvaluator::new(Difficulty::Medium, 77);
    let first = eval.best_move(&board, &piece).expect("placement");
    assert_eq!(first.features.holes, 0);
    assert_eq!(first.features.lines, 0);
    // No holes or lines, so only height, bumpiness and wells contribute.
    let w = Difficulty::Medium.weights();
    let expected = w.height * first.features.aggregate_height as f32
        + w.bumpiness * first.features.bumpiness as f32
        + w.wells * first.features.wells as f32;
    assert!((first.base_score - expected).abs() < 1e-5);

    for _ in 0..20 {
        let again = eval.best_move(&board, &piece).expect("placement");
        assert_eq!(again.base_score, first.base_score);
        assert_eq!(again.features.holes, 0);
        assert!((again.score - again.base_score).abs() <= Difficulty::Medium.jitter());
    }
}

#[test]
fn test_evaluator_i_piece_lies_flat_on_empty_board() {
    let board = Board::new();
    let mut eval = MoveEvaluator::new(Difficulty::Expert, 3);
    let best = eval
        .best_move(&board, &Piece::new(PieceKind::I))
        .expect("placement");
    assert_eq!(best.features.aggregate_height, 4);
    assert_eq!(best.features.holes, 0);
    assert_eq!(best.features.bumpiness, 1);
}

#[test]
fn test_evaluator_choice_can_be_applied() {
    let mut game = Match::new(99);
    *game.board_mut() = Board::from_ascii(&["##.#######", "##.#######"]);
    assert!(game.set_active(Piece::new(PieceKind::I)));

    let active = game.active().expect("active piece");
    let mut eval = MoveEvaluator::new(Difficulty::Expert, 1);
    let best = eval.best_move(game.board(), &active).expect("placement");

    let events = apply_place(&mut game, best.x, best.rotation, false).expect("placed");
    assert_eq!(events.lines_cleared, best.features.lines);
    assert_eq!(events.lines_cleared, 2);
}

#[test]
fn test_cpu_versus_round_produces_garbage() {
    let config = MatchConfig::default();
    let seats = (0..2)
        .map(|i| {
            Match::with_config(40 + i, config.clone())
                .with_pilot(Box::new(CpuPilot::new(Difficulty::Expert, 40 + i)))
        })
        .collect();
    let mut versus = Versus::new(seats);

    let mut frames = 0;
    while frames < 20_000 && !versus.is_finished() {
        versus.update(&[], 16);
        frames += 1;
    }

    let placed: u32 = versus.seats().iter().map(|s| s.stats().pieces_placed).sum();
    assert!(placed > 20);
    for (i, seat) in versus.seats().iter().enumerate() {
        let other = &versus.seats()[1 - i];
        assert_eq!(seat.stats().garbage_received, other.stats().garbage_sent);
    }
    if let Outcome::Winner(i) = versus.outcome() {
        assert!(!versus.seats()[i].is_game_over());
    }
}

#[test]
fn test_headless_round_summary() {
    let config = VersusConfig {
        seats: vec![Difficulty::Easy, Difficulty::Expert],
        seed: 7,
        max_frames: 2_000,
        ..VersusConfig::default()
    };

    let summary = run_round(&config, tetris_versus::core::logger::noop());
    assert!(summary.frames <= 2_000);
    assert_eq!(summary.elapsed_ms, summary.frames as u64 * 16);
    assert_eq!(summary.seats.len(), 2);
    assert_eq!(summary.seats[0].difficulty, Difficulty::Easy);

    let json = serde_json::to_value(&summary).expect("serialize");
    assert!(json["seats"][1]["stats"]["pieces_placed"].is_number());
}

#[test]
fn test_versus_config_from_partial_json() {
    let config: VersusConfig = serde_json::from_str(
        r#"{ "seats": ["hard", "hard", "easy"], "match": { "randomizer": "seven_bag" } }"#,
    )
    .expect("valid config");
    assert_eq!(config.seats.len(), 3);
    assert_eq!(config.frame_ms, 16);
    assert_eq!(
        config.match_config.randomizer,
        tetris_versus::core::Randomizer::SevenBag
    );
    assert_eq!(config.match_config.input_interval_ms, 120);
}
