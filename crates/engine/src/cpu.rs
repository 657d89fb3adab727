//! Computer controller.
//!
//! [`CpuPilot`] decides at a fixed cadence on the match clock. When a new piece appears it
//! asks the [`MoveEvaluator`] for the best landing spot and turns it into a [`Plan`], then
//! hands out one plan step per decision tick. Without a usable plan it occasionally makes a
//! wandering move that drifts toward the middle of the board.

use arrayvec::ArrayVec;

use tetris_versus_core::logger::{self, Level, SharedLogger};
use tetris_versus_core::{Match, Pilot, SimpleRng};
use tetris_versus_types::{Action, BOARD_WIDTH, CPU_DECISION_INTERVAL_MS};

use crate::evaluator::{Difficulty, MoveEvaluator};
use crate::planner::{plan_actions, Plan};

/// Chance per idle decision tick of making a wandering move
const WANDER_CHANCE: f32 = 0.05;
/// Chance that a wandering move may be a hard drop
const WANDER_HARD_DROP_CHANCE: f32 = 0.1;
/// Chance that a wandering move may be a hold
const WANDER_HOLD_CHANCE: f32 = 0.05;

#[derive(Debug)]
pub struct CpuPilot {
    difficulty: Difficulty,
    evaluator: MoveEvaluator,
    rng: SimpleRng,
    logger: SharedLogger,
    decision_interval_ms: u32,
    last_decision_ms: Option<u64>,
    /// Active-piece serial the current plan was built for
    planned_for: Option<u32>,
    plan: Plan,
    step: usize,
    /// A plan step was handed out and its acknowledgement is pending
    awaiting_ack: bool,
}

impl CpuPilot {
    pub fn new(difficulty: Difficulty, seed: u32) -> Self {
        Self {
            difficulty,
            evaluator: MoveEvaluator::new(difficulty, seed),
            rng: SimpleRng::new(seed.rotate_left(16) ^ 0x5A5A_5A5A),
            logger: logger::noop(),
            decision_interval_ms: CPU_DECISION_INTERVAL_MS,
            last_decision_ms: None,
            planned_for: None,
            plan: Plan::new(),
            step: 0,
            awaiting_ack: false,
        }
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_decision_interval(mut self, interval_ms: u32) -> Self {
        self.decision_interval_ms = interval_ms;
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn decision_interval_ms(&self) -> u32 {
        self.decision_interval_ms
    }

    pub fn last_decision_ms(&self) -> Option<u64> {
        self.last_decision_ms
    }

    /// Steps of the current plan the match has not accepted yet
    pub fn remaining_plan(&self) -> &[Action] {
        self.plan.get(self.step..).unwrap_or(&[])
    }

    fn replan(&mut self, game: &Match) {
        self.plan.clear();
        self.step = 0;
        self.awaiting_ack = false;
        self.planned_for = Some(game.active_id());

        let Some(active) = game.active() else {
            return;
        };
        let Some(target) = self.evaluator.best_move(game.board(), &active) else {
            self.log(Level::DEBUG, format_args!("no placement for {}", active.kind.as_str()));
            return;
        };

        match plan_actions(&active, target.x, target.rotation) {
            Ok(plan) => {
                self.log(
                    Level::TRACE,
                    format_args!(
                        "{} -> x {} {} score {:.2} ({} steps)",
                        active.kind.as_str(),
                        target.x,
                        target.rotation.as_str(),
                        target.score,
                        plan.len()
                    ),
                );
                self.plan = plan;
            }
            Err(err) => {
                self.log(Level::WARN, format_args!("planning failed: {}", err.message()));
            }
        }
    }

    fn wander(&mut self, game: &Match) -> Option<Action> {
        if self.rng.next_f32() >= WANDER_CHANCE {
            return None;
        }
        let active = game.active()?;

        let mut moves: ArrayVec<Action, 8> = ArrayVec::new();
        moves.extend([
            Action::MoveLeft,
            Action::MoveRight,
            Action::RotateCw,
            Action::SoftDrop,
        ]);

        let center = (BOARD_WIDTH / 2) as i8;
        if active.x < center {
            moves.extend([Action::MoveRight, Action::MoveRight]);
        } else if active.x > center {
            moves.extend([Action::MoveLeft, Action::MoveLeft]);
        }
        if self.rng.next_f32() < WANDER_HARD_DROP_CHANCE {
            moves.push(Action::HardDrop);
        }
        if self.rng.next_f32() < WANDER_HOLD_CHANCE && game.can_hold() {
            moves.push(Action::Hold);
        }

        let pick = self.rng.next_range(moves.len() as u32) as usize;
        moves.get(pick).copied()
    }

    fn log(&self, level: Level, args: std::fmt::Arguments<'_>) {
        if self.logger.enabled(level) {
            self.logger.log(level, "cpu", args);
        }
    }
}

impl Pilot for CpuPilot {
    fn decide(&mut self, game: &Match, now_ms: u64) -> Option<Action> {
        if let Some(last) = self.last_decision_ms {
            if now_ms.saturating_sub(last) < self.decision_interval_ms as u64 {
                return None;
            }
        }
        self.last_decision_ms = Some(now_ms);

        if game.active().is_none() {
            return None;
        }
        if self.planned_for != Some(game.active_id()) {
            self.replan(game);
        }

        if let Some(&action) = self.plan.get(self.step) {
            self.awaiting_ack = true;
            return Some(action);
        }
        self.wander(game)
    }

    fn acknowledge(&mut self, action: Action, accepted: bool) {
        if !std::mem::take(&mut self.awaiting_ack) {
            return;
        }
        if accepted && self.plan.get(self.step) == Some(&action) {
            self.step += 1;
        }
    }

    fn reset(&mut self) {
        self.last_decision_ms = None;
        self.planned_for = None;
        self.plan.clear();
        self.step = 0;
        self.awaiting_ack = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_versus_core::input::ActionSnapshot;
    use tetris_versus_core::Piece;
    use tetris_versus_types::PieceKind;

    #[test]
    fn test_decides_on_cadence() {
        let game = Match::new(3);
        let mut pilot = CpuPilot::new(Difficulty::Hard, 3);

        assert!(pilot.decide(&game, 16).is_some());
        assert_eq!(pilot.last_decision_ms(), Some(16));
        assert!(pilot.decide(&game, 400).is_none());
        assert_eq!(pilot.last_decision_ms(), Some(16));
        pilot.decide(&game, 416);
        assert_eq!(pilot.last_decision_ms(), Some(416));
    }

    #[test]
    fn test_plan_ends_with_hard_drop() {
        let game = Match::new(8);
        let mut pilot = CpuPilot::new(Difficulty::Expert, 8);

        let first = pilot.decide(&game, 0);
        assert!(first.is_some());
        let remaining = pilot.remaining_plan();
        let last = remaining.last().copied().or(first);
        assert_eq!(last, Some(Action::HardDrop));
    }

    #[test]
    fn test_replans_for_new_piece() {
        let mut game = Match::new(5);
        let mut pilot = CpuPilot::new(Difficulty::Medium, 5).with_decision_interval(0);

        pilot.decide(&game, 0);
        let planned = pilot.planned_for;
        assert_eq!(planned, Some(game.active_id()));

        game.apply_action(Action::HardDrop);
        pilot.decide(&game, 1);
        assert_eq!(pilot.planned_for, Some(game.active_id()));
        assert_ne!(pilot.planned_for, planned);
    }

    #[test]
    fn test_cpu_match_places_pieces() {
        let config = tetris_versus_core::MatchConfig::default();
        let mut game = Match::with_config(21, config)
            .with_pilot(Box::new(CpuPilot::new(Difficulty::Hard, 21)));
        assert!(game.set_active(Piece::new(PieceKind::O)));

        let idle = ActionSnapshot::new();
        let mut locked = 0;
        for _ in 0..600 {
            if game.update(&idle, 50).piece_locked {
                locked += 1;
            }
        }
        assert!(locked >= 3);
        assert_eq!(game.stats().pieces_placed, locked);
    }

    #[test]
    fn test_step_advances_only_when_accepted() {
        let game = Match::new(8);
        let mut pilot = CpuPilot::new(Difficulty::Expert, 8).with_decision_interval(0);

        let first = pilot.decide(&game, 0).expect("step");
        let planned = pilot.remaining_plan().len();
        pilot.acknowledge(first, false);
        assert_eq!(pilot.remaining_plan().len(), planned);
        assert_eq!(pilot.decide(&game, 1), Some(first));

        pilot.acknowledge(first, true);
        assert_eq!(pilot.remaining_plan().len(), planned - 1);
    }

    #[test]
    fn test_fast_cadence_still_reaches_target() {
        let mut game = Match::new(9);
        assert!(game.set_active(Piece::new(PieceKind::T)));
        let active = game.active().expect("active");
        let target = MoveEvaluator::new(Difficulty::Expert, 9)
            .best_move(game.board(), &active)
            .expect("placement");

        let pilot = CpuPilot::new(Difficulty::Expert, 9).with_decision_interval(50);
        let mut game = game.with_pilot(Box::new(pilot));

        let idle = ActionSnapshot::new();
        let mut locked = None;
        for _ in 0..200 {
            let events = game.update(&idle, 16);
            if events.piece_locked {
                locked = Some(events);
                break;
            }
        }
        let events = locked.expect("piece locked");
        assert!(events.hard_drop);

        let landed = Piece::at(PieceKind::T, target.x, target.y, target.rotation);
        for (x, y) in landed.cells() {
            assert!(game.board().is_occupied(x, y), "missing mino at ({}, {})", x, y);
        }
        assert_eq!(game.board().filled_count(), 4);
    }

    #[test]
    fn test_reset_forgets_plan() {
        let game = Match::new(2);
        let mut pilot = CpuPilot::new(Difficulty::Easy, 2);
        pilot.decide(&game, 0);
        pilot.reset();
        assert!(pilot.remaining_plan().is_empty());
        assert_eq!(pilot.last_decision_ms(), None);
    }
}
